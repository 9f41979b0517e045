//! rangeable turns numeric input elements into single or dual-handle range
//! sliders.
//!
//! The crate is headless: it owns the value model, pointer and keyboard
//! interaction, and tooltip logic, while the embedding page supplies rendering,
//! measurement and event delivery through the [`Host`] trait.
//!
//! # Attaching a slider
//!
//! ```
//! use rangeable::{Host, Mode, Rangeable, SliderConfig, SliderValue};
//!
//! fn upgrade<H: Host>(host: H) -> rangeable::Result<()> {
//!     let config = SliderConfig::builder()
//!         .mode(Mode::Double)
//!         .min(0.0)
//!         .max(100.0)
//!         .step(5.0)
//!         .build()
//!         .expect("valid config");
//!     let Some(mut slider) = Rangeable::attach(host, config) else {
//!         // Someone else already upgraded this element.
//!         return Ok(());
//!     };
//!     slider.set_values([20.0, 80.0])?;
//!     assert_eq!(slider.value(), SliderValue::Double([20.0, 80.0]));
//!     Ok(())
//! }
//! ```
//!
//! # Events
//!
//! The host forwards events with [`Rangeable::handle_event`]. Only events from
//! sources the slider currently listens to are processed: pointer moves and
//! releases are subscribed for the length of a drag, and presses and key
//! strokes are unsubscribed while the slider is disabled.
//!
//! # Notifications
//!
//! Every committed value change reaches the [`SliderObserver`] and dispatches
//! [`Notification::Input`] on the element. A completed gesture that moved the
//! value additionally dispatches [`Notification::Change`].
//!
//! # Values
//!
//! Values are quantized to the step grid, rounded to the step's decimal
//! places, and clamped to the bounds, the handle's own limit, and in double
//! mode to the sibling handle. See [`value`] for the exact rules.

#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

pub mod callback;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod interaction;
pub mod observer;
pub mod ownership;
pub mod position;
pub mod px;
pub mod subscription;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod throttle;
pub mod tooltip;
pub mod value;
mod widget;

pub use crate::{
    callback::CallbackWith,
    config::{HandleOptions, Mode, SliderConfig, SliderConfigBuilder, TooltipVisibility, TrackSize},
    error::{RangeableError, Result},
    event::{Key, PointerKind, SliderEvent},
    host::{
        Attribute, Document, ElementId, EventSource, Host, ListenerId, Notification, Part,
        Scaffold, TooltipSlot, VisualFlag,
    },
    observer::{NoopObserver, SliderCallbacks, SliderObserver},
    position::Axis,
    px::{PxPosition, PxRect},
    value::{Bounds, HandleLimit, SliderValue},
    widget::Rangeable,
};
