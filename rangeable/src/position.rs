//! Value <-> pixel mapping along the slider's axis.
//!
//! Offsets are measured from the track's origin edge: the left edge for a
//! horizontal track, the bottom edge for a vertical one, so that moving up a
//! vertical slider increases its value. The mapper is a pure transform; it
//! never clamps or quantizes.

use crate::{
    px::{PxPosition, PxRect},
    value::Bounds,
};

/// Orientation of the track.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Values grow from left to right.
    #[default]
    Horizontal,
    /// Values grow from bottom to top.
    Vertical,
}

impl Axis {
    /// Axis for the `vertical` configuration flag.
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// Component of `position` along this axis.
    pub fn coordinate(self, position: PxPosition) -> f64 {
        match self {
            Self::Horizontal => position.x,
            Self::Vertical => position.y,
        }
    }

    /// Leading edge of `rect` along this axis (left or top).
    pub fn leading_edge(self, rect: &PxRect) -> f64 {
        match self {
            Self::Horizontal => rect.left(),
            Self::Vertical => rect.top(),
        }
    }

    /// Extent of `rect` along this axis (width or height).
    pub fn extent(self, rect: &PxRect) -> f64 {
        match self {
            Self::Horizontal => rect.width,
            Self::Vertical => rect.height,
        }
    }
}

/// Converts between values and positions on a measured track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMapper {
    axis: Axis,
    bounds: Bounds,
    track: PxRect,
}

impl PositionMapper {
    /// Creates a mapper for `track`, the measured container rect.
    pub fn new(axis: Axis, bounds: Bounds, track: PxRect) -> Self {
        Self {
            axis,
            bounds,
            track,
        }
    }

    /// Length of the track along the axis.
    pub fn track_length(&self) -> f64 {
        self.axis.extent(&self.track)
    }

    /// Distance of `value` from the origin edge, in pixels.
    pub fn value_to_offset(&self, value: f64) -> f64 {
        let span = self.bounds.span();
        if span == 0.0 {
            return 0.0;
        }
        (value - self.bounds.min) / span * self.track_length()
    }

    /// Raw value under an absolute pointer coordinate.
    pub fn offset_to_value(&self, coordinate: f64) -> f64 {
        let length = self.track_length();
        if length <= 0.0 {
            return self.bounds.min;
        }
        let fraction = self.offset_of_coordinate(coordinate) / length;
        fraction * self.bounds.span() + self.bounds.min
    }

    /// Absolute coordinate at which `value` sits; the inverse of
    /// [`PositionMapper::offset_to_value`].
    pub fn value_to_coordinate(&self, value: f64) -> f64 {
        let offset = self.value_to_offset(value);
        match self.axis {
            Axis::Horizontal => self.track.left() + offset,
            Axis::Vertical => self.track.bottom() - offset,
        }
    }

    /// Distance of an absolute coordinate from the origin edge.
    pub fn offset_of_coordinate(&self, coordinate: f64) -> f64 {
        match self.axis {
            Axis::Horizontal => coordinate - self.track.left(),
            Axis::Vertical => self.track.bottom() - coordinate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> PositionMapper {
        PositionMapper::new(
            Axis::Horizontal,
            Bounds::new(0.0, 100.0, 1.0),
            PxRect::new(50.0, 10.0, 200.0, 20.0),
        )
    }

    fn vertical() -> PositionMapper {
        PositionMapper::new(
            Axis::Vertical,
            Bounds::new(-50.0, 50.0, 1.0),
            PxRect::new(0.0, 100.0, 20.0, 400.0),
        )
    }

    #[test]
    fn horizontal_mapping_starts_at_left_edge() {
        let mapper = horizontal();
        assert_eq!(mapper.track_length(), 200.0);
        assert_eq!(mapper.value_to_offset(0.0), 0.0);
        assert_eq!(mapper.value_to_offset(25.0), 50.0);
        assert_eq!(mapper.offset_to_value(50.0), 0.0);
        assert_eq!(mapper.offset_to_value(150.0), 50.0);
        assert_eq!(mapper.value_to_coordinate(100.0), 250.0);
    }

    #[test]
    fn vertical_mapping_grows_upwards() {
        let mapper = vertical();
        assert_eq!(mapper.offset_to_value(500.0), -50.0);
        assert_eq!(mapper.offset_to_value(100.0), 50.0);
        assert_eq!(mapper.offset_to_value(300.0), 0.0);
        assert_eq!(mapper.value_to_coordinate(50.0), 100.0);
        assert_eq!(mapper.value_to_offset(0.0), 200.0);
    }

    #[test]
    fn mapping_does_not_clamp() {
        let mapper = horizontal();
        assert_eq!(mapper.offset_to_value(0.0), -25.0);
        assert_eq!(mapper.value_to_offset(150.0), 300.0);
    }

    #[test]
    fn degenerate_tracks_map_to_origin() {
        let zero_span =
            PositionMapper::new(Axis::Horizontal, Bounds::new(5.0, 5.0, 1.0), PxRect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(zero_span.value_to_offset(5.0), 0.0);

        let zero_track =
            PositionMapper::new(Axis::Horizontal, Bounds::default(), PxRect::ZERO);
        assert_eq!(zero_track.offset_to_value(42.0), 0.0);
    }

    #[test]
    fn round_trip_within_a_pixel() {
        for mapper in [horizontal(), vertical()] {
            let bounds = mapper.bounds;
            for i in 0..=100 {
                let value = bounds.min + bounds.span() * f64::from(i) / 100.0;
                let coordinate = mapper.value_to_coordinate(value);
                let back = mapper.offset_to_value(coordinate);
                assert!((back - value).abs() < 1e-9);
                let offset = mapper.value_to_offset(back);
                assert!((offset - mapper.offset_of_coordinate(coordinate)).abs() <= 1.0);
            }
        }
    }
}
