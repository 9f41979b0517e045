//! Pixel coordinate primitives.
//!
//! Host layouts report fractional client coordinates, so every value here is
//! an `f64` in the host's client space.
//!
//! # Coordinate System
//!
//! - Origin (0, 0) at the top-left corner of the client area
//! - X-axis increases to the right
//! - Y-axis increases downward
//!
//! # Example
//!
//! ```
//! use rangeable::px::{PxPosition, PxRect};
//!
//! let handle = PxRect::new(40.0, 0.0, 16.0, 16.0);
//! assert!(handle.contains(PxPosition::new(48.0, 8.0)));
//! assert_eq!(handle.right(), 56.0);
//! ```

/// A position in client pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PxPosition {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl PxPosition {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns a position moved by the given deltas.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An axis-aligned rectangle in client pixel space.
///
/// This is the shape a host reports for any measured part of the slider
/// (container, handle, tooltip), mirroring a bounding client rect.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PxRect {
    /// The x coordinate of the left edge.
    pub x: f64,
    /// The y coordinate of the top edge.
    pub y: f64,
    /// The width of the rectangle.
    pub width: f64,
    /// The height of the rectangle.
    pub height: f64,
}

impl PxRect {
    /// A zero-sized rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle from its top-left corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if `position` lies inside the rectangle, edges included.
    pub fn contains(&self, position: PxPosition) -> bool {
        position.x >= self.left()
            && position.x <= self.right()
            && position.y >= self.top()
            && position.y <= self.bottom()
    }

    /// Axis-aligned bounding-box intersection test.
    ///
    /// Touching edges count as intersecting, so two tooltips that merely abut
    /// are merged.
    ///
    /// ```
    /// use rangeable::px::PxRect;
    ///
    /// let a = PxRect::new(0.0, 0.0, 20.0, 10.0);
    /// let b = PxRect::new(20.0, 0.0, 20.0, 10.0);
    /// let c = PxRect::new(21.0, 0.0, 20.0, 10.0);
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }
}
