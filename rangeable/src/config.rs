//! Slider configuration.
//!
//! Configuration is fixed once a slider is initialized. Build one with
//! [`SliderConfigBuilder`]; every field has a default, so
//! `SliderConfig::default()` describes a single-handle slider with always
//! visible tooltips whose bounds come from the element.
//!
//! ```
//! use rangeable::config::{HandleOptions, SliderConfigBuilder, TooltipVisibility};
//! use rangeable::value::{HandleLimit, SliderValue};
//!
//! let config = SliderConfigBuilder::default()
//!     .value(SliderValue::Double([20.0, 80.0]))
//!     .step(10.0)
//!     .tooltips(TooltipVisibility::OnInteraction)
//!     .handles(vec![
//!         HandleOptions::default().limit(HandleLimit::new(10.0, 60.0)),
//!         HandleOptions::default().locked(true),
//!     ])
//!     .build()
//!     .expect("every field has a default");
//! assert!(config.resolved_mode().is_double());
//! assert!(config.handle(1).locked);
//! ```

use std::{fmt, sync::Arc, time::Duration};

use derive_builder::Builder;
use smallvec::SmallVec;

use crate::{
    observer::{NoopObserver, SliderObserver},
    value::{HandleLimit, SliderValue, parse_number},
};

/// Default rate limit for scroll-triggered geometry refreshes.
pub const DEFAULT_SCROLL_THROTTLE: Duration = Duration::from_millis(100);
/// Default rate limit for resize-triggered geometry refreshes.
pub const DEFAULT_RESIZE_THROTTLE: Duration = Duration::from_millis(50);

/// Number of handles a slider drives.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One handle, one value.
    #[default]
    Single,
    /// Two ordered handles describing a closed range.
    Double,
}

impl Mode {
    /// Returns `true` for [`Mode::Double`].
    pub fn is_double(self) -> bool {
        self == Self::Double
    }

    /// Number of handles for this mode.
    pub fn handles(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// When tooltips are shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TooltipVisibility {
    /// Tooltips are always visible.
    #[default]
    Always,
    /// Tooltips are visible only while a handle is being dragged.
    OnInteraction,
    /// No tooltips are rendered.
    Hidden,
}

impl TooltipVisibility {
    /// Returns `true` unless tooltips are disabled entirely.
    pub fn is_enabled(self) -> bool {
        self != Self::Hidden
    }
}

/// Track length override along the slider's axis.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackSize {
    /// Length in pixels.
    Px(f64),
    /// Any CSS length, passed to the host verbatim.
    Css(String),
}

impl From<f64> for TrackSize {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

impl From<&str> for TrackSize {
    /// Numeric text is read as pixels, anything else is kept as a CSS length.
    fn from(text: &str) -> Self {
        match parse_number(text) {
            Some(px) => Self::Px(px),
            None => Self::Css(text.to_owned()),
        }
    }
}

impl fmt::Display for TrackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Css(css) => f.write_str(css),
        }
    }
}

/// Per-handle options.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct HandleOptions {
    /// Sub-range this handle is confined to.
    pub limit: HandleLimit,
    /// A locked handle cannot be dragged, focused or stepped by the user.
    /// Programmatic updates still apply.
    pub locked: bool,
}

impl HandleOptions {
    /// Sets the handle limit.
    pub fn limit(mut self, limit: HandleLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Sets whether the handle is locked.
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

/// Configuration for a slider instance.
#[derive(Builder, Clone)]
#[builder(pattern = "owned")]
pub struct SliderConfig {
    /// Handle count. A [`SliderValue::Double`] value implies
    /// [`Mode::Double`] regardless of this field.
    #[builder(default)]
    pub mode: Mode,

    /// Initial value. Falls back to the element's value (single mode) or
    /// `[min, max]` (double mode).
    #[builder(default, setter(strip_option))]
    pub value: Option<SliderValue>,

    /// Lower bound override; wins over the element attribute.
    #[builder(default, setter(strip_option))]
    pub min: Option<f64>,

    /// Upper bound override; wins over the element attribute.
    #[builder(default, setter(strip_option))]
    pub max: Option<f64>,

    /// Step override; wins over the element attribute.
    #[builder(default, setter(strip_option))]
    pub step: Option<f64>,

    /// Lay the track out vertically, with values growing upwards.
    #[builder(default)]
    pub vertical: bool,

    /// Track length override.
    #[builder(default, setter(strip_option, into))]
    pub size: Option<TrackSize>,

    /// Tooltip visibility policy.
    #[builder(default)]
    pub tooltips: TooltipVisibility,

    /// Rate limit for scroll and resize refreshes. `None` keeps the
    /// per-source defaults.
    #[builder(default, setter(strip_option))]
    pub update_throttle: Option<Duration>,

    /// Per-handle options, indexed like the handles.
    #[builder(default, setter(custom))]
    pub handles: SmallVec<[HandleOptions; 2]>,

    /// Receiver of lifecycle notifications.
    #[builder(default = "Arc::new(NoopObserver)", setter(custom))]
    pub observer: Arc<dyn SliderObserver>,
}

impl SliderConfigBuilder {
    /// Sets the per-handle options.
    pub fn handles(mut self, handles: impl IntoIterator<Item = HandleOptions>) -> Self {
        self.handles = Some(handles.into_iter().collect());
        self
    }

    /// Sets the options of a single-handle slider.
    pub fn handle(self, handle: HandleOptions) -> Self {
        self.handles([handle])
    }

    /// Sets the lifecycle observer.
    pub fn observer(mut self, observer: impl SliderObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }
}

impl SliderConfig {
    /// Starts a builder.
    pub fn builder() -> SliderConfigBuilder {
        SliderConfigBuilder::default()
    }

    /// Effective mode after taking the configured value into account.
    pub fn resolved_mode(&self) -> Mode {
        match self.value {
            Some(SliderValue::Double(_)) => Mode::Double,
            _ => self.mode,
        }
    }

    /// Options of handle `index`; defaults when none were configured.
    pub fn handle(&self, index: usize) -> HandleOptions {
        self.handles.get(index).copied().unwrap_or_default()
    }

    /// Returns `true` if handle `index` is locked.
    pub fn is_locked(&self, index: usize) -> bool {
        self.handle(index).locked
    }

    /// Rate limit for scroll refreshes.
    pub fn scroll_throttle(&self) -> Duration {
        self.update_throttle.unwrap_or(DEFAULT_SCROLL_THROTTLE)
    }

    /// Rate limit for resize refreshes.
    pub fn resize_throttle(&self) -> Duration {
        self.update_throttle.unwrap_or(DEFAULT_RESIZE_THROTTLE)
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            value: None,
            min: None,
            max: None,
            step: None,
            vertical: false,
            size: None,
            tooltips: TooltipVisibility::default(),
            update_throttle: None,
            handles: SmallVec::new(),
            observer: Arc::new(NoopObserver),
        }
    }
}

impl fmt::Debug for SliderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderConfig")
            .field("mode", &self.mode)
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("vertical", &self.vertical)
            .field("size", &self.size)
            .field("tooltips", &self.tooltips)
            .field("update_throttle", &self.update_throttle)
            .field("handles", &self.handles)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_value_implies_double_mode() {
        let config = SliderConfig::builder()
            .value(SliderValue::Double([1.0, 2.0]))
            .build()
            .unwrap();
        assert_eq!(config.mode, Mode::Single);
        assert_eq!(config.resolved_mode(), Mode::Double);

        let config = SliderConfig::builder().mode(Mode::Double).build().unwrap();
        assert_eq!(config.resolved_mode(), Mode::Double);
    }

    #[test]
    fn throttle_override_applies_to_both_sources() {
        let config = SliderConfig::default();
        assert_eq!(config.scroll_throttle(), DEFAULT_SCROLL_THROTTLE);
        assert_eq!(config.resize_throttle(), DEFAULT_RESIZE_THROTTLE);

        let config = SliderConfig::builder()
            .update_throttle(Duration::from_millis(16))
            .build()
            .unwrap();
        assert_eq!(config.scroll_throttle(), Duration::from_millis(16));
        assert_eq!(config.resize_throttle(), Duration::from_millis(16));
    }

    #[test]
    fn track_size_from_text() {
        assert_eq!(TrackSize::from("240"), TrackSize::Px(240.0));
        assert_eq!(TrackSize::from("50%"), TrackSize::Css("50%".into()));
        assert_eq!(TrackSize::Px(240.0).to_string(), "240px");
        assert_eq!(TrackSize::from("12rem").to_string(), "12rem");
    }

    #[test]
    fn missing_handle_options_default_to_unlocked() {
        let config = SliderConfig::builder()
            .handle(HandleOptions::default().locked(true))
            .build()
            .unwrap();
        assert!(config.is_locked(0));
        assert!(!config.is_locked(1));
        assert!(config.handle(3).limit.is_unbounded());
    }
}
