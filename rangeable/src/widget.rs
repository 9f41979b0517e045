//! The slider widget and its lifecycle.
//!
//! [`Rangeable`] upgrades one host element into a single or double slider.
//! The lifecycle is `attach` (which runs `init`: resolve, render, bind,
//! synchronize) followed by any number of events and programmatic updates,
//! and finally `destroy`, which undoes everything `init` did. A destroyed
//! slider can be initialised again.

use tracing::{debug, trace};

use crate::{
    config::{Mode, SliderConfig},
    error::{RangeableError, Result},
    event::SliderEvent,
    geometry::GeometryRects,
    host::{Attribute, Document, EventSource, Host, Notification, Scaffold, VisualFlag},
    interaction::InteractionState,
    ownership,
    position::{Axis, PositionMapper},
    subscription::{INTERACTION_SOURCES, LIFETIME_SOURCES, SubscriptionRegistry},
    throttle::Throttle,
    tooltip::TooltipPresenter,
    value::{
        Bounds, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP, HandleLimit, Rounding, SliderValue,
        ValueModel, parse_number, parse_pair,
    },
};

/// Whether a committed value also dispatches [`Notification::Input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    Notify,
    /// The element already carries the new value; only the observer hears
    /// about it.
    Silent,
}

/// A slider bound to a host element.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "testing")]
/// # {
/// use rangeable::{Rangeable, SliderConfig, SliderValue, testing::FakeHost};
///
/// let config = SliderConfig::builder().min(0.0).max(100.0).step(10.0).build().unwrap();
/// let mut slider = Rangeable::attach(FakeHost::new(), config).unwrap();
/// slider.set_value(47.0, None).unwrap();
/// assert_eq!(slider.value(), SliderValue::Single(50.0));
/// # }
/// ```
pub struct Rangeable<H: Host> {
    pub(crate) host: H,
    pub(crate) config: SliderConfig,
    pub(crate) mode: Mode,
    pub(crate) axis: Axis,
    pub(crate) model: ValueModel,
    defaults: SliderValue,
    pub(crate) geometry: GeometryRects,
    pub(crate) tooltips: TooltipPresenter,
    pub(crate) subscriptions: SubscriptionRegistry,
    pub(crate) state: InteractionState,
    scroll_throttle: Throttle,
    resize_throttle: Throttle,
    initialised: bool,
    pub(crate) enabled: bool,
}

impl<H: Host> Rangeable<H> {
    /// Upgrades `host` into a slider.
    ///
    /// Returns `None` when another live slider already owns the element; the
    /// existing slider is left untouched.
    pub fn attach(host: H, config: SliderConfig) -> Option<Self> {
        let mut slider = Self::new(host, config);
        slider.init().then_some(slider)
    }

    /// Looks `selector` up in `document` and upgrades the first match.
    ///
    /// # Errors
    ///
    /// [`RangeableError::TargetNotFound`] when nothing matches.
    pub fn attach_selector<D>(
        document: &mut D,
        selector: &str,
        config: SliderConfig,
    ) -> Result<Option<Self>>
    where
        D: Document<Element = H>,
    {
        let host = document.query_selector(selector).ok_or_else(|| {
            RangeableError::TargetNotFound {
                selector: selector.to_owned(),
            }
        })?;
        Ok(Self::attach(host, config))
    }

    fn new(host: H, config: SliderConfig) -> Self {
        let mode = config.resolved_mode();
        let initial = match mode {
            Mode::Single => SliderValue::Single(DEFAULT_MIN),
            Mode::Double => SliderValue::Double([DEFAULT_MIN, DEFAULT_MAX]),
        };
        Self {
            host,
            mode,
            axis: Axis::from_vertical(config.vertical),
            model: ValueModel::new(Bounds::default(), initial),
            defaults: initial,
            geometry: GeometryRects::default(),
            tooltips: TooltipPresenter::new(config.tooltips),
            subscriptions: SubscriptionRegistry::new(),
            state: InteractionState::Idle,
            scroll_throttle: Throttle::new(config.scroll_throttle()),
            resize_throttle: Throttle::new(config.resize_throttle()),
            initialised: false,
            enabled: true,
            config,
        }
    }

    /// Resolves the configuration against the element, renders the slider
    /// structure and starts listening.
    ///
    /// Returns `false` without doing anything when this slider is already
    /// initialised or another slider owns the element.
    pub fn init(&mut self) -> bool {
        if self.initialised {
            trace!("init skipped, already initialised");
            return false;
        }
        let element = self.host.element_id();
        if !ownership::claim(element) {
            debug!(?element, "element is already a slider");
            return false;
        }

        self.resolve();
        self.mount();
        self.bind();
        self.synchronize();
        self.initialised = true;

        let value = self.model.value();
        debug!(?element, mode = ?self.mode, ?value, "slider initialised");
        self.config.observer.on_init(value);
        true
    }

    /// Config overrides win over element attributes, which win over the
    /// defaults. The resolved values are written back to the element.
    fn resolve(&mut self) {
        let read = |attribute| self.host.attribute(attribute).as_deref().and_then(parse_number);
        let bounds = Bounds::new(
            self.config.min.or_else(|| read(Attribute::Min)).unwrap_or(DEFAULT_MIN),
            self.config.max.or_else(|| read(Attribute::Max)).unwrap_or(DEFAULT_MAX),
            self.config.step.or_else(|| read(Attribute::Step)).unwrap_or(DEFAULT_STEP),
        );

        let element_value = self.host.attribute(Attribute::Value);
        let initial = match (self.mode, self.config.value) {
            (Mode::Double, Some(SliderValue::Double(pair))) => SliderValue::Double(pair),
            (Mode::Double, _) => SliderValue::Double(
                element_value
                    .as_deref()
                    .and_then(parse_pair)
                    .unwrap_or([bounds.min, bounds.max]),
            ),
            (Mode::Single, Some(value)) => SliderValue::Single(value.low()),
            (Mode::Single, None) => SliderValue::Single(
                element_value
                    .as_deref()
                    .and_then(parse_number)
                    .unwrap_or(bounds.min),
            ),
        };

        let mut model = ValueModel::new(bounds, initial);
        for index in 0..model.handles() {
            model.set_limit(index, self.config.handle(index).limit);
        }
        model.reapply();
        self.model = model;
        self.write_bounds();

        let current = self.model.value();
        let text = current.format(self.model.accuracy());
        self.host.set_attribute(Attribute::Value, &text);
        self.defaults = match self.host.default_value() {
            Some(stored) if !stored.trim().is_empty() => {
                parse_value(self.mode, &stored).unwrap_or(current)
            }
            _ => {
                self.host.set_default_value(&text);
                current
            }
        };
    }

    fn write_bounds(&mut self) {
        let Bounds { min, max, step } = self.model.bounds();
        self.host.set_attribute(Attribute::Min, &min.to_string());
        self.host.set_attribute(Attribute::Max, &max.to_string());
        self.host.set_attribute(Attribute::Step, &step.to_string());
    }

    /// Mounts the slider structure again and repaints it from the current
    /// state. A drag in progress is abandoned. Does nothing before `init`.
    pub fn render(&mut self) {
        if !self.initialised {
            return;
        }
        self.abort_drag();
        self.mount();
        self.sync_focusable();
        self.synchronize();
    }

    fn mount(&mut self) {
        self.host.mount(&Scaffold {
            mode: self.mode,
            axis: self.axis,
            size: self.config.size.clone(),
            tooltips: self.config.tooltips,
        });
        self.tooltips.mount(&mut self.host);
        self.host.set_flag(VisualFlag::Disabled, !self.enabled);
    }

    fn bind(&mut self) {
        self.subscriptions.subscribe_all(&mut self.host, LIFETIME_SOURCES);
        if self.host.has_form() {
            self.subscriptions.subscribe(&mut self.host, EventSource::FormReset);
        }
        if self.enabled {
            self.subscriptions.subscribe_all(&mut self.host, INTERACTION_SOURCES);
        }
        self.sync_focusable();
    }

    fn sync_focusable(&mut self) {
        for index in 0..self.model.handles() {
            let focusable = self.enabled && !self.config.is_locked(index);
            self.host.set_handle_focusable(index, focusable);
        }
    }

    /// Re-measures the layout and re-applies every stored value, repainting
    /// progress and tooltips.
    pub fn update(&mut self) {
        if self.initialised {
            self.synchronize();
        }
    }

    fn synchronize(&mut self) {
        self.refresh_geometry();
        self.model.refresh_accuracy();
        for index in 0..self.model.handles() {
            let current = self.model.get(index).unwrap_or(self.model.bounds().min);
            self.apply(current, index, Rounding::Up, Delivery::Notify);
        }
    }

    pub(crate) fn refresh_geometry(&mut self) {
        self.geometry = GeometryRects::measure(&self.host, self.model.handles());
    }

    pub(crate) fn mapper(&self) -> PositionMapper {
        PositionMapper::new(self.axis, self.model.bounds(), self.geometry.container)
    }

    /// Clamps and stores `raw` for `handle`, then commits it.
    pub(crate) fn apply(
        &mut self,
        raw: f64,
        handle: usize,
        rounding: Rounding,
        delivery: Delivery,
    ) -> bool {
        let changed = self.model.set_toward(raw, Some(handle), rounding);
        self.commit(handle, changed, delivery);
        changed
    }

    /// Applies a `[low, high]` pair in an order that keeps the first write from
    /// being blocked by the stale sibling.
    fn apply_pair(&mut self, pair: [f64; 2], delivery: Delivery) -> bool {
        let high = self.model.get(1).unwrap_or(pair[0]);
        let order = if pair[0] > high { [1, 0] } else { [0, 1] };
        let mut changed = false;
        for index in order {
            changed |= self.apply(pair[index], index, Rounding::Up, delivery);
        }
        changed
    }

    /// Repaints `handle` and notifies the observer and element if the value
    /// changed. Nothing is announced before initialisation completes.
    pub(crate) fn commit(&mut self, handle: usize, changed: bool, delivery: Delivery) {
        self.render_value(handle);
        if !(changed && self.initialised) {
            return;
        }
        let value = self.model.value();
        trace!(handle, ?value, ?delivery, "value committed");
        self.config.observer.on_change(value);
        if delivery == Delivery::Notify {
            self.host.dispatch(Notification::Input);
        }
    }

    fn render_value(&mut self, handle: usize) {
        let value = self.model.value();
        let accuracy = self.model.accuracy();
        self.host.set_attribute(Attribute::Value, &value.format(accuracy));

        let mapper = self.mapper();
        let (start, length) = match value {
            SliderValue::Single(value) => (0.0, mapper.value_to_offset(value)),
            SliderValue::Double([low, high]) => {
                let start = mapper.value_to_offset(low);
                (start, mapper.value_to_offset(high) - start)
            }
        };
        self.host.set_progress(start, length);
        self.tooltips.present(&mut self.host, value, handle, accuracy);
    }

    /// Feeds a host event into the slider.
    ///
    /// Events from sources the slider is not currently subscribed to are
    /// dropped, so a disabled slider ignores presses and a slider at rest
    /// ignores stray pointer moves.
    pub fn handle_event(&mut self, event: SliderEvent) {
        if !self.initialised || !self.subscriptions.is_subscribed(event.source()) {
            trace!(?event, "event ignored");
            return;
        }
        match event {
            SliderEvent::PointerDown { position, kind } => self.start_drag(position, kind),
            SliderEvent::PointerMove { position } => self.drag_to(position),
            SliderEvent::PointerUp | SliderEvent::TouchCancel => self.end_drag(),
            SliderEvent::KeyDown { handle, key } => self.key_step(handle, key),
            SliderEvent::Scroll { at } => {
                if self.scroll_throttle.ready(at) {
                    self.synchronize();
                }
            }
            SliderEvent::Resize { at } => {
                if self.resize_throttle.ready(at) {
                    self.synchronize();
                }
            }
            SliderEvent::NativeChange => self.native_change(),
            SliderEvent::FormReset => self.reset(),
        }
    }

    /// Re-reads the element's value after an outside change. The observer is
    /// told, but no `Input` is dispatched since the element already knows.
    fn native_change(&mut self) {
        let text = self.host.attribute(Attribute::Value).unwrap_or_default();
        match self.mode {
            Mode::Single => {
                let raw = parse_number(&text).unwrap_or(f64::NAN);
                self.apply(raw, 0, Rounding::Up, Delivery::Silent);
            }
            Mode::Double => match parse_pair(&text) {
                Some(pair) => {
                    self.apply_pair(pair, Delivery::Silent);
                }
                None => self.render_value(0),
            },
        }
    }

    /// Restores the value(s) captured at initialisation.
    pub fn reset(&mut self) {
        if !self.initialised {
            return;
        }
        self.abort_drag();
        match self.defaults {
            SliderValue::Single(value) => {
                self.apply(value, 0, Rounding::Up, Delivery::Notify);
            }
            SliderValue::Double(pair) => {
                self.apply_pair(pair, Delivery::Notify);
            }
        }
        let value = self.model.value();
        debug!(?value, "slider reset");
        self.config.observer.on_end(value);
    }

    /// Accepts user input again.
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        if self.initialised {
            self.host.set_flag(VisualFlag::Disabled, false);
            self.subscriptions.subscribe_all(&mut self.host, INTERACTION_SOURCES);
            self.sync_focusable();
        }
        debug!("slider enabled");
    }

    /// Stops accepting user input. A drag in progress is abandoned without
    /// notifications; programmatic updates keep working.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.abort_drag();
        self.enabled = false;
        if self.initialised {
            self.host.set_flag(VisualFlag::Disabled, true);
            self.subscriptions.unsubscribe_all(&mut self.host, INTERACTION_SOURCES);
            self.sync_focusable();
        }
        debug!("slider disabled");
    }

    /// Removes every listener, unmounts the structure and releases the
    /// element. [`Rangeable::init`] may be called again afterwards.
    pub fn destroy(&mut self) {
        if !self.initialised {
            return;
        }
        self.abort_drag();
        self.subscriptions.clear(&mut self.host);
        self.host.unmount();
        self.scroll_throttle.reset();
        self.resize_throttle.reset();
        self.geometry = GeometryRects::default();
        let element = self.host.element_id();
        ownership::release(element);
        self.initialised = false;
        debug!(?element, "slider destroyed");
    }

    /// Sets handle `index` (`None` for a single slider) to `value`.
    ///
    /// Returns whether the stored value changed.
    ///
    /// # Errors
    ///
    /// [`RangeableError::MissingHandleIndex`] for a double slider without an
    /// index, [`RangeableError::InvalidHandleIndex`] for an index past the
    /// last handle.
    pub fn set_value(&mut self, value: f64, index: Option<usize>) -> Result<bool> {
        let handle = self.checked_index(index)?;
        Ok(self.apply(value, handle, Rounding::Up, Delivery::Notify))
    }

    /// Sets both handles of a double slider.
    ///
    /// # Errors
    ///
    /// [`RangeableError::InvalidHandleIndex`] on a single slider.
    pub fn set_values(&mut self, values: [f64; 2]) -> Result<bool> {
        if !self.mode.is_double() {
            return Err(RangeableError::InvalidHandleIndex {
                index: 1,
                handles: self.model.handles(),
            });
        }
        Ok(self.apply_pair(values, Delivery::Notify))
    }

    /// Moves a handle one step up.
    ///
    /// # Errors
    ///
    /// See [`Rangeable::set_value`].
    pub fn step_up(&mut self, index: Option<usize>) -> Result<bool> {
        self.step(index, 1)
    }

    /// Moves a handle one step down.
    ///
    /// # Errors
    ///
    /// See [`Rangeable::set_value`].
    pub fn step_down(&mut self, index: Option<usize>) -> Result<bool> {
        self.step(index, -1)
    }

    fn step(&mut self, index: Option<usize>, steps: i32) -> Result<bool> {
        let handle = self.checked_index(index)?;
        let changed = self.model.step_by(steps, Some(handle));
        self.commit(handle, changed, Delivery::Notify);
        Ok(changed)
    }

    fn checked_index(&self, index: Option<usize>) -> Result<usize> {
        let handles = self.model.handles();
        match index {
            None if handles > 1 => Err(RangeableError::MissingHandleIndex),
            None => Ok(0),
            Some(index) if index < handles => Ok(index),
            Some(index) => Err(RangeableError::InvalidHandleIndex { index, handles }),
        }
    }

    /// Replaces min, max and step, writes them to the element and re-clamps
    /// the value(s).
    pub fn set_limits(&mut self, min: f64, max: f64, step: f64) {
        self.model.set_bounds(Bounds::new(min, max, step));
        self.write_bounds();
        if self.initialised {
            self.synchronize();
        } else {
            self.model.reapply();
        }
    }

    /// Confines handle `index` to `limit` and re-clamps.
    ///
    /// # Errors
    ///
    /// [`RangeableError::InvalidHandleIndex`] for an index past the last
    /// handle.
    pub fn set_handle_limit(&mut self, index: usize, limit: HandleLimit) -> Result<()> {
        let handles = self.model.handles();
        if !self.model.set_limit(index, limit) {
            return Err(RangeableError::InvalidHandleIndex { index, handles });
        }
        if self.config.handles.len() < handles {
            self.config.handles.resize(handles, Default::default());
        }
        self.config.handles[index].limit = limit;
        if self.initialised {
            self.synchronize();
        } else {
            self.model.reapply();
        }
        Ok(())
    }

    /// Current value.
    pub fn value(&self) -> SliderValue {
        self.model.value()
    }

    /// Value(s) restored by [`Rangeable::reset`].
    pub fn default_value(&self) -> SliderValue {
        self.defaults
    }

    /// Current min, max and step.
    pub fn bounds(&self) -> Bounds {
        self.model.bounds()
    }

    /// Decimal places values are rounded to.
    pub fn accuracy(&self) -> usize {
        self.model.accuracy()
    }

    /// Single or double.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Track orientation.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The configuration the slider was attached with.
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Returns `true` between `init` and `destroy`.
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Returns `true` unless [`Rangeable::disable`] was called.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` while a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Handle being dragged, if any.
    pub fn active_handle(&self) -> Option<usize> {
        self.state.active_handle()
    }

    /// Cached layout.
    pub fn geometry(&self) -> &GeometryRects {
        &self.geometry
    }

    /// The host element.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host element, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: Host> Drop for Rangeable<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<H: Host> std::fmt::Debug for Rangeable<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rangeable")
            .field("element", &self.host.element_id())
            .field("mode", &self.mode)
            .field("axis", &self.axis)
            .field("value", &self.model.value())
            .field("initialised", &self.initialised)
            .field("enabled", &self.enabled)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn parse_value(mode: Mode, text: &str) -> Option<SliderValue> {
    match mode {
        Mode::Single => parse_number(text).map(SliderValue::Single),
        Mode::Double => parse_pair(text).map(SliderValue::Double),
    }
}
