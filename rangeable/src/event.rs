//! Events forwarded from the host into a slider.

use std::time::Instant;

use crate::{host::EventSource, position::Axis, px::PxPosition};

/// Input device behind a pointer event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse or pen.
    #[default]
    Mouse,
    /// First touch point of a touch gesture.
    Touch,
}

/// Keys the slider reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Any other key.
    Other,
}

impl Key {
    /// Steps this key moves a handle on `axis`: `Some(1)`, `Some(-1)`, or
    /// `None` for keys that do not belong to the axis.
    pub fn steps(self, axis: Axis) -> Option<i32> {
        match (axis, self) {
            (Axis::Horizontal, Self::ArrowRight) | (Axis::Vertical, Self::ArrowUp) => Some(1),
            (Axis::Horizontal, Self::ArrowLeft) | (Axis::Vertical, Self::ArrowDown) => Some(-1),
            _ => None,
        }
    }
}

/// An event delivered to [`crate::Rangeable::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// Press on the slider surface.
    PointerDown {
        /// Client position of the press.
        position: PxPosition,
        /// Device that pressed.
        kind: PointerKind,
    },
    /// Pointer movement anywhere in the document.
    PointerMove {
        /// Client position of the pointer.
        position: PxPosition,
    },
    /// Pointer release or touch end anywhere in the document.
    PointerUp,
    /// Touch cancellation; handled exactly like [`SliderEvent::PointerUp`].
    TouchCancel,
    /// Key press on a focused handle.
    KeyDown {
        /// Index of the focused handle.
        handle: usize,
        /// The key.
        key: Key,
    },
    /// Document scroll.
    Scroll {
        /// When the scroll happened.
        at: Instant,
    },
    /// Window resize.
    Resize {
        /// When the resize happened.
        at: Instant,
    },
    /// The input's value was changed by something other than the slider.
    NativeChange,
    /// The input's form was reset.
    FormReset,
}

impl SliderEvent {
    /// Listener source that delivers this event.
    pub fn source(&self) -> EventSource {
        match self {
            Self::PointerDown { .. } => EventSource::SurfacePointerDown,
            Self::PointerMove { .. } => EventSource::DocumentPointerMove,
            Self::PointerUp => EventSource::DocumentPointerUp,
            Self::TouchCancel => EventSource::DocumentTouchCancel,
            Self::KeyDown { .. } => EventSource::HandleKeyDown,
            Self::Scroll { .. } => EventSource::DocumentScroll,
            Self::Resize { .. } => EventSource::WindowResize,
            Self::NativeChange => EventSource::ElementChange,
            Self::FormReset => EventSource::FormReset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_follow_the_axis() {
        assert_eq!(Key::ArrowRight.steps(Axis::Horizontal), Some(1));
        assert_eq!(Key::ArrowLeft.steps(Axis::Horizontal), Some(-1));
        assert_eq!(Key::ArrowUp.steps(Axis::Horizontal), None);
        assert_eq!(Key::ArrowUp.steps(Axis::Vertical), Some(1));
        assert_eq!(Key::ArrowDown.steps(Axis::Vertical), Some(-1));
        assert_eq!(Key::ArrowRight.steps(Axis::Vertical), None);
        assert_eq!(Key::Other.steps(Axis::Horizontal), None);
    }
}
