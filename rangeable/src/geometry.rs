//! Cached layout rects.
//!
//! Position math during a drag reads from this cache instead of asking the
//! host for fresh layout on every pointer sample. The cache is refreshed at
//! drag start, on `update`, and on throttled scroll/resize.

use smallvec::SmallVec;
use tracing::trace;

use crate::{
    host::{Host, Part},
    position::Axis,
    px::{PxPosition, PxRect},
};

/// Snapshot of the container and handle rects.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeometryRects {
    /// Container rect; its extent along the axis is the track length.
    pub container: PxRect,
    /// One rect per handle.
    pub handles: SmallVec<[PxRect; 2]>,
}

impl GeometryRects {
    /// Measures the container and `handles` handle rects from the host.
    pub fn measure<H: Host + ?Sized>(host: &H, handles: usize) -> Self {
        let rects = Self {
            container: host.measure(Part::Container),
            handles: (0..handles).map(|i| host.measure(Part::Handle(i))).collect(),
        };
        trace!(container = ?rects.container, handles = ?rects.handles, "geometry refreshed");
        rects
    }

    /// Rect of handle `index`.
    pub fn handle(&self, index: usize) -> Option<&PxRect> {
        self.handles.get(index)
    }

    /// Index of the handle under `position`. When handles overlap the one
    /// painted last (the highest index) wins.
    pub fn handle_at(&self, position: PxPosition) -> Option<usize> {
        self.handles
            .iter()
            .enumerate()
            .rev()
            .find(|(_, rect)| rect.contains(position))
            .map(|(index, _)| index)
    }

    /// Distance from `coordinate` to the leading edge of each handle.
    pub fn edge_distances(&self, axis: Axis, coordinate: f64) -> SmallVec<[f64; 2]> {
        self.handles
            .iter()
            .map(|rect| (coordinate - axis.leading_edge(rect)).abs())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects() -> GeometryRects {
        GeometryRects {
            container: PxRect::new(0.0, 0.0, 200.0, 20.0),
            handles: SmallVec::from_slice(&[
                PxRect::new(40.0, 0.0, 20.0, 20.0),
                PxRect::new(50.0, 0.0, 20.0, 20.0),
            ]),
        }
    }

    #[test]
    fn overlapping_handles_resolve_to_topmost() {
        let rects = rects();
        assert_eq!(rects.handle_at(PxPosition::new(45.0, 10.0)), Some(0));
        assert_eq!(rects.handle_at(PxPosition::new(55.0, 10.0)), Some(1));
        assert_eq!(rects.handle_at(PxPosition::new(150.0, 10.0)), None);
    }

    #[test]
    fn edge_distances_use_leading_edge() {
        let rects = rects();
        let distances = rects.edge_distances(Axis::Horizontal, 100.0);
        assert_eq!(distances.as_slice(), &[60.0, 50.0]);
        let distances = rects.edge_distances(Axis::Vertical, 5.0);
        assert_eq!(distances.as_slice(), &[5.0, 5.0]);
    }
}
