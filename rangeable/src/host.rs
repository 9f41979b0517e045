//! Capabilities the embedding page provides.
//!
//! The slider never touches a document directly. Everything it needs from the
//! outside world, the input element's attributes, the rendered structure's
//! geometry, visual state toggles and listener registration, goes through
//! [`Host`]. A DOM binding implements it over real elements; the `testing`
//! module implements it in memory.

use crate::{
    config::{Mode, TooltipVisibility, TrackSize},
    position::Axis,
    px::PxRect,
};

/// Identity of a host element, used to mark ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Numeric attributes read from and written back to the input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `min`
    Min,
    /// `max`
    Max,
    /// `step`
    Step,
    /// `value`
    Value,
}

impl Attribute {
    /// Attribute name as it appears on the element.
    pub fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Step => "step",
            Self::Value => "value",
        }
    }
}

/// Tooltip slots. Double sliders own a third, combined tooltip shown when the
/// two handle tooltips collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TooltipSlot {
    /// Tooltip attached to a handle.
    Handle(usize),
    /// Merged tooltip of a double slider.
    Combined,
}

/// Measurable parts of the rendered slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// Outer container; its extent along the axis is the track length.
    Container,
    /// A handle.
    Handle(usize),
    /// A tooltip.
    Tooltip(TooltipSlot),
}

/// Visual state toggled on the rendered structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualFlag {
    /// A drag gesture is in progress.
    Dragging,
    /// The slider is disabled.
    Disabled,
    /// The combined tooltip replaces the per-handle tooltips.
    CombinedTooltip,
    /// Tooltips are currently shown.
    TooltipsVisible,
    /// A handle is the active drag target.
    ActiveHandle(usize),
}

/// Notifications dispatched on the input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// Fired for every committed value change.
    Input,
    /// Fired once per completed gesture whose value moved.
    Change,
}

/// Event sources the slider subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    /// Pointer or touch press on the slider surface.
    SurfacePointerDown,
    /// Document-level pointer or touch movement.
    DocumentPointerMove,
    /// Document-level pointer release or touch end.
    DocumentPointerUp,
    /// Document-level touch cancellation.
    DocumentTouchCancel,
    /// Key presses on a focused handle.
    HandleKeyDown,
    /// Document scrolling.
    DocumentScroll,
    /// Window resizing.
    WindowResize,
    /// `change` fired on the input by something other than the slider.
    ElementChange,
    /// Reset of the input's form.
    FormReset,
}

/// Handle returned by [`Host::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Description of the structure to render around the input element.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaffold {
    /// Single or double.
    pub mode: Mode,
    /// Track orientation.
    pub axis: Axis,
    /// Track length override.
    pub size: Option<TrackSize>,
    /// Tooltip policy; [`TooltipVisibility::Hidden`] renders no tooltips.
    pub tooltips: TooltipVisibility,
}

/// The input element a slider upgrades, together with the structure rendered
/// around it.
pub trait Host {
    /// Stable identity of the input element.
    fn element_id(&self) -> ElementId;

    /// Reads an attribute. `None` when absent.
    fn attribute(&self, attribute: Attribute) -> Option<String>;

    /// Writes an attribute.
    fn set_attribute(&mut self, attribute: Attribute, value: &str);

    /// The element's default value, restored by form resets.
    fn default_value(&self) -> Option<String>;

    /// Sets the element's default value.
    fn set_default_value(&mut self, value: &str);

    /// Whether the element belongs to a form.
    fn has_form(&self) -> bool;

    /// Dispatches a notification on the element.
    fn dispatch(&mut self, notification: Notification);

    /// Wraps the element in the rendered slider structure.
    fn mount(&mut self, scaffold: &Scaffold);

    /// Removes the rendered structure and puts the element back in place.
    fn unmount(&mut self);

    /// Current client rect of a rendered part.
    fn measure(&self, part: Part) -> PxRect;

    /// Writes a tooltip's text.
    fn set_tooltip_text(&mut self, slot: TooltipSlot, text: &str);

    /// Positions the progress bar: `start` and `length` along the axis,
    /// measured from the track's origin edge.
    fn set_progress(&mut self, start: f64, length: f64);

    /// Toggles a visual flag.
    fn set_flag(&mut self, flag: VisualFlag, on: bool);

    /// Makes a handle reachable by keyboard focus, or not.
    fn set_handle_focusable(&mut self, index: usize, focusable: bool);

    /// Starts delivering events from `source`.
    fn listen(&mut self, source: EventSource) -> ListenerId;

    /// Stops delivering events for a listener.
    fn unlisten(&mut self, listener: ListenerId);
}

/// Resolves selectors to host elements.
pub trait Document {
    /// Element type produced by this document.
    type Element: Host;

    /// First element matching `selector`.
    fn query_selector(&mut self, selector: &str) -> Option<Self::Element>;
}
