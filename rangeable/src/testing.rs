//! In-memory [`Host`] and [`Document`] for tests and demos.
//!
//! [`FakeHost`] lays the slider out deterministically: handles are squares
//! centred on the progress bar's ends, and tooltips sit beside their handle
//! with a width proportional to their text. Everything the slider writes is
//! recorded for inspection.

use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    host::{
        Attribute, Document, ElementId, EventSource, Host, ListenerId, Notification, Part,
        Scaffold, TooltipSlot, VisualFlag,
    },
    position::Axis,
    px::{PxPosition, PxRect},
};

/// Edge length of a handle.
pub const HANDLE_SIZE: f64 = 16.0;
/// Width of one tooltip character.
pub const CHAR_WIDTH: f64 = 8.0;
/// Horizontal padding on each side of tooltip text.
pub const TOOLTIP_PADDING: f64 = 4.0;
/// Height of a tooltip.
pub const TOOLTIP_HEIGHT: f64 = 20.0;
/// Gap between the track and its tooltips.
pub const TOOLTIP_GAP: f64 = 4.0;

static NEXT_ELEMENT: AtomicU64 = AtomicU64::new(1);

/// Recording host element.
#[derive(Debug, Clone)]
pub struct FakeHost {
    id: ElementId,
    attributes: FxHashMap<Attribute, String>,
    default_value: Option<String>,
    form: bool,
    container: PxRect,
    scaffold: Option<Scaffold>,
    mounts: usize,
    progress: (f64, f64),
    flags: FxHashSet<VisualFlag>,
    tooltips: FxHashMap<TooltipSlot, String>,
    focusable: FxHashMap<usize, bool>,
    listeners: FxHashMap<ListenerId, EventSource>,
    next_listener: u64,
    notifications: Vec<Notification>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    /// A fresh element with a unique id and a 200x16 track at the origin.
    pub fn new() -> Self {
        Self {
            id: ElementId(NEXT_ELEMENT.fetch_add(1, Ordering::Relaxed)),
            attributes: FxHashMap::default(),
            default_value: None,
            form: false,
            container: PxRect::new(0.0, 0.0, 200.0, HANDLE_SIZE),
            scaffold: None,
            mounts: 0,
            progress: (0.0, 0.0),
            flags: FxHashSet::default(),
            tooltips: FxHashMap::default(),
            focusable: FxHashMap::default(),
            listeners: FxHashMap::default(),
            next_listener: 1,
            notifications: Vec::new(),
        }
    }

    /// Sets an attribute before the element is upgraded.
    pub fn with_attribute(mut self, attribute: Attribute, value: &str) -> Self {
        self.attributes.insert(attribute, value.to_owned());
        self
    }

    /// Sets the element's default value.
    pub fn with_default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_owned());
        self
    }

    /// Places the element inside a form.
    pub fn with_form(mut self) -> Self {
        self.form = true;
        self
    }

    /// Sets the container rect.
    pub fn with_container(mut self, container: PxRect) -> Self {
        self.container = container;
        self
    }

    /// Moves or resizes the container, as a layout change would.
    pub fn set_container(&mut self, container: PxRect) {
        self.container = container;
    }

    /// Whether the slider structure is mounted.
    pub fn is_mounted(&self) -> bool {
        self.scaffold.is_some()
    }

    /// The mounted structure.
    pub fn scaffold(&self) -> Option<&Scaffold> {
        self.scaffold.as_ref()
    }

    /// How many times a structure was mounted.
    pub fn mount_count(&self) -> usize {
        self.mounts
    }

    /// Progress bar `(start, length)`.
    pub fn progress(&self) -> (f64, f64) {
        self.progress
    }

    /// Whether `flag` is on.
    pub fn flag(&self, flag: VisualFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Text of a tooltip, if it was ever written.
    pub fn tooltip(&self, slot: TooltipSlot) -> Option<&str> {
        self.tooltips.get(&slot).map(String::as_str)
    }

    /// Whether handle `index` is keyboard-focusable.
    pub fn is_focusable(&self, index: usize) -> bool {
        self.focusable.get(&index).copied().unwrap_or(false)
    }

    /// Whether some listener for `source` is live.
    pub fn is_listening(&self, source: EventSource) -> bool {
        self.listeners.values().any(|&live| live == source)
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Notifications dispatched so far.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// How many times `notification` was dispatched.
    pub fn count(&self, notification: Notification) -> usize {
        self.notifications
            .iter()
            .filter(|&&dispatched| dispatched == notification)
            .count()
    }

    /// Drains the recorded notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn axis(&self) -> Axis {
        self.scaffold
            .as_ref()
            .map(|scaffold| scaffold.axis)
            .unwrap_or_default()
    }

    fn handle_offsets(&self) -> [f64; 2] {
        let (start, length) = self.progress;
        match self.scaffold.as_ref().map(|scaffold| scaffold.mode.is_double()) {
            Some(true) => [start, start + length],
            _ => [start + length, start + length],
        }
    }

    /// Centre of the point `offset` pixels from the track's origin edge.
    fn centre_at(&self, offset: f64) -> PxPosition {
        let rect = &self.container;
        match self.axis() {
            Axis::Horizontal => PxPosition::new(rect.left() + offset, rect.top() + rect.height / 2.0),
            Axis::Vertical => PxPosition::new(rect.left() + rect.width / 2.0, rect.bottom() - offset),
        }
    }

    /// Client position of handle `index`'s centre.
    pub fn handle_centre(&self, index: usize) -> PxPosition {
        let offsets = self.handle_offsets();
        self.centre_at(offsets.get(index).copied().unwrap_or(0.0))
    }

    /// Client position at which the track holds `fraction` (`0.0..=1.0`) of
    /// its length.
    pub fn track_point(&self, fraction: f64) -> PxPosition {
        let length = match self.axis() {
            Axis::Horizontal => self.container.width,
            Axis::Vertical => self.container.height,
        };
        self.centre_at(length * fraction)
    }

    fn tooltip_rect(&self, slot: TooltipSlot) -> PxRect {
        let [first, second] = self.handle_offsets();
        let offset = match slot {
            TooltipSlot::Handle(0) => first,
            TooltipSlot::Handle(_) => second,
            TooltipSlot::Combined => (first + second) / 2.0,
        };
        let centre = self.centre_at(offset);
        let chars = self.tooltip(slot).map_or(0, |text| text.chars().count());
        let width = chars as f64 * CHAR_WIDTH + 2.0 * TOOLTIP_PADDING;
        match self.axis() {
            Axis::Horizontal => PxRect::new(
                centre.x - width / 2.0,
                self.container.top() - TOOLTIP_GAP - TOOLTIP_HEIGHT,
                width,
                TOOLTIP_HEIGHT,
            ),
            Axis::Vertical => PxRect::new(
                self.container.right() + TOOLTIP_GAP,
                centre.y - TOOLTIP_HEIGHT / 2.0,
                width,
                TOOLTIP_HEIGHT,
            ),
        }
    }
}

impl Host for FakeHost {
    fn element_id(&self) -> ElementId {
        self.id
    }

    fn attribute(&self, attribute: Attribute) -> Option<String> {
        self.attributes.get(&attribute).cloned()
    }

    fn set_attribute(&mut self, attribute: Attribute, value: &str) {
        self.attributes.insert(attribute, value.to_owned());
    }

    fn default_value(&self) -> Option<String> {
        self.default_value.clone()
    }

    fn set_default_value(&mut self, value: &str) {
        self.default_value = Some(value.to_owned());
    }

    fn has_form(&self) -> bool {
        self.form
    }

    fn dispatch(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn mount(&mut self, scaffold: &Scaffold) {
        self.scaffold = Some(scaffold.clone());
        self.mounts += 1;
    }

    fn unmount(&mut self) {
        self.scaffold = None;
        self.flags.clear();
        self.tooltips.clear();
        self.focusable.clear();
        self.progress = (0.0, 0.0);
    }

    fn measure(&self, part: Part) -> PxRect {
        match part {
            Part::Container => self.container,
            Part::Handle(index) => {
                let centre = self.handle_centre(index);
                PxRect::new(
                    centre.x - HANDLE_SIZE / 2.0,
                    centre.y - HANDLE_SIZE / 2.0,
                    HANDLE_SIZE,
                    HANDLE_SIZE,
                )
            }
            Part::Tooltip(slot) => self.tooltip_rect(slot),
        }
    }

    fn set_tooltip_text(&mut self, slot: TooltipSlot, text: &str) {
        self.tooltips.insert(slot, text.to_owned());
    }

    fn set_progress(&mut self, start: f64, length: f64) {
        self.progress = (start, length);
    }

    fn set_flag(&mut self, flag: VisualFlag, on: bool) {
        if on {
            self.flags.insert(flag);
        } else {
            self.flags.remove(&flag);
        }
    }

    fn set_handle_focusable(&mut self, index: usize, focusable: bool) {
        self.focusable.insert(index, focusable);
    }

    fn listen(&mut self, source: EventSource) -> ListenerId {
        let listener = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(listener, source);
        listener
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }
}

/// Selector-addressable collection of [`FakeHost`]s.
///
/// Lookups hand out clones that share the element's id, so a second lookup
/// of the same selector refers to the same element.
#[derive(Debug, Default, Clone)]
pub struct FakeDocument {
    elements: Vec<(String, FakeHost)>,
}

impl FakeDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element reachable through `selector`.
    pub fn insert(&mut self, selector: &str, element: FakeHost) {
        self.elements.push((selector.to_owned(), element));
    }
}

impl Document for FakeDocument {
    type Element = FakeHost;

    fn query_selector(&mut self, selector: &str) -> Option<FakeHost> {
        self.elements
            .iter()
            .find(|(candidate, _)| candidate == selector)
            .map(|(_, element)| element.clone())
    }
}
