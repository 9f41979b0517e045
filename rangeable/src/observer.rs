//! Lifecycle notifications delivered to user code.
//!
//! A slider reports four moments: construction finished, a drag started, the
//! value changed, and an interaction ended. Implement [`SliderObserver`] for
//! full control, or use [`SliderCallbacks`] to attach only the closures you
//! care about.

use crate::{callback::CallbackWith, value::SliderValue};

/// Receives slider lifecycle notifications. Every method defaults to a no-op.
pub trait SliderObserver: Send + Sync {
    /// The slider finished initializing.
    fn on_init(&self, _value: SliderValue) {}
    /// A drag gesture started.
    fn on_start(&self, _value: SliderValue) {}
    /// A new value was committed.
    fn on_change(&self, _value: SliderValue) {}
    /// A drag gesture ended, or the slider was reset.
    fn on_end(&self, _value: SliderValue) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SliderObserver for NoopObserver {}

/// Observer assembled from optional closures.
///
/// ```
/// use rangeable::observer::{SliderCallbacks, SliderObserver};
/// use rangeable::value::SliderValue;
///
/// let callbacks = SliderCallbacks::new().on_change(|value: SliderValue| {
///     println!("now {}", value.low());
/// });
/// SliderObserver::on_change(&callbacks, SliderValue::Single(3.0));
/// // No `on_end` closure was given, so this is a no-op.
/// SliderObserver::on_end(&callbacks, SliderValue::Single(3.0));
/// ```
#[derive(Debug, Default, Clone)]
pub struct SliderCallbacks {
    on_init: Option<CallbackWith<SliderValue>>,
    on_start: Option<CallbackWith<SliderValue>>,
    on_change: Option<CallbackWith<SliderValue>>,
    on_end: Option<CallbackWith<SliderValue>>,
}

impl SliderCallbacks {
    /// Creates an empty set of callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initialization callback.
    pub fn on_init(mut self, callback: impl Into<CallbackWith<SliderValue>>) -> Self {
        self.on_init = Some(callback.into());
        self
    }

    /// Sets the drag-start callback.
    pub fn on_start(mut self, callback: impl Into<CallbackWith<SliderValue>>) -> Self {
        self.on_start = Some(callback.into());
        self
    }

    /// Sets the value-change callback.
    pub fn on_change(mut self, callback: impl Into<CallbackWith<SliderValue>>) -> Self {
        self.on_change = Some(callback.into());
        self
    }

    /// Sets the end-of-interaction callback.
    pub fn on_end(mut self, callback: impl Into<CallbackWith<SliderValue>>) -> Self {
        self.on_end = Some(callback.into());
        self
    }
}

impl SliderObserver for SliderCallbacks {
    fn on_init(&self, value: SliderValue) {
        if let Some(callback) = &self.on_init {
            callback.call(value);
        }
    }

    fn on_start(&self, value: SliderValue) {
        if let Some(callback) = &self.on_start {
            callback.call(value);
        }
    }

    fn on_change(&self, value: SliderValue) {
        if let Some(callback) = &self.on_change {
            callback.call(value);
        }
    }

    fn on_end(&self, value: SliderValue) {
        if let Some(callback) = &self.on_end {
            callback.call(value);
        }
    }
}
