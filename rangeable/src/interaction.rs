//! Pointer and keyboard interaction.
//!
//! A gesture starts with a press on the slider surface, which picks the handle
//! to move, and ends with a document-level release or touch cancellation.
//! Move/release listeners only exist while a gesture is in flight.

use std::mem;

use tracing::{debug, trace};

use crate::{
    event::{Key, PointerKind},
    geometry::GeometryRects,
    host::{Host, Notification, VisualFlag},
    position::Axis,
    px::PxPosition,
    subscription::DRAG_SOURCES,
    value::{Rounding, SliderValue},
    widget::{Delivery, Rangeable},
};

/// Bookkeeping for one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Handle being dragged.
    pub active: usize,
    /// Value when the gesture started; a `Change` fires at release only if
    /// the value ended up elsewhere.
    pub start_value: SliderValue,
    /// Raw (unquantized) value of the previous pointer sample.
    pub last_raw: Option<f64>,
    /// Rounding applied to the latest sample.
    pub rounding: Rounding,
}

impl DragSession {
    /// Starts a session on handle `active`.
    pub fn new(active: usize, start_value: SliderValue) -> Self {
        Self {
            active,
            start_value,
            last_raw: None,
            rounding: Rounding::Up,
        }
    }

    /// Records a pointer sample and returns the rounding to apply to it.
    ///
    /// Moving towards larger values snaps up, moving towards smaller values
    /// snaps down, and a sample that did not move keeps the previous choice.
    /// The handle therefore always leads the pointer in the direction of
    /// travel instead of sticking one step behind it.
    pub fn advance(&mut self, raw: f64) -> Rounding {
        if let Some(previous) = self.last_raw {
            if raw > previous {
                self.rounding = Rounding::Up;
            } else if raw < previous {
                self.rounding = Rounding::Down;
            }
        }
        self.last_raw = Some(raw);
        self.rounding
    }
}

/// Whether a drag is in progress.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum InteractionState {
    /// No gesture in flight.
    #[default]
    Idle,
    /// A handle follows the pointer.
    Dragging(DragSession),
}

impl InteractionState {
    /// Returns `true` while dragging.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// The handle being dragged.
    pub fn active_handle(&self) -> Option<usize> {
        match self {
            Self::Dragging(session) => Some(session.active),
            Self::Idle => None,
        }
    }
}

/// Picks the handle a press at `position` should move.
///
/// A press on a handle's rect selects that handle, topmost first; pressing a
/// locked handle selects nothing. A press elsewhere on a double slider goes to
/// the handle whose leading edge is nearest (the first handle on ties), or to
/// the other one when the nearest is locked.
pub fn select_handle(
    geometry: &GeometryRects,
    axis: Axis,
    position: PxPosition,
    handles: usize,
    is_locked: impl Fn(usize) -> bool,
) -> Option<usize> {
    if handles < 2 {
        return (!is_locked(0)).then_some(0);
    }

    if let Some(hit) = geometry.handle_at(position) {
        return (!is_locked(hit)).then_some(hit);
    }

    let distances = geometry.edge_distances(axis, axis.coordinate(position));
    let nearest = match distances.as_slice() {
        [first, second, ..] if second < first => 1,
        _ => 0,
    };
    let other = 1 - nearest;
    if !is_locked(nearest) {
        Some(nearest)
    } else if !is_locked(other) {
        Some(other)
    } else {
        None
    }
}

impl<H: Host> Rangeable<H> {
    pub(crate) fn start_drag(&mut self, position: PxPosition, kind: PointerKind) {
        if !self.enabled || self.state.is_dragging() {
            return;
        }
        self.refresh_geometry();

        let config = &self.config;
        let Some(active) = select_handle(
            &self.geometry,
            self.axis,
            position,
            self.model.handles(),
            |index| config.is_locked(index),
        ) else {
            trace!(?position, ?kind, "press ignored, no draggable handle");
            return;
        };

        let start_value = self.model.value();
        debug!(active, ?kind, ?start_value, "drag started");
        self.config.observer.on_start(start_value);
        self.host.set_flag(VisualFlag::Dragging, true);
        self.host.set_flag(VisualFlag::ActiveHandle(active), true);
        self.tooltips.set_interacting(&mut self.host, true);
        self.subscriptions.subscribe_all(&mut self.host, DRAG_SOURCES);

        let mut session = DragSession::new(active, start_value);
        let raw = self.raw_value_at(position);
        let rounding = session.advance(raw);
        self.state = InteractionState::Dragging(session);
        self.apply(raw, active, rounding, Delivery::Notify);
    }

    pub(crate) fn drag_to(&mut self, position: PxPosition) {
        let raw = self.raw_value_at(position);
        let InteractionState::Dragging(session) = &mut self.state else {
            return;
        };
        let rounding = session.advance(raw);
        let active = session.active;
        self.apply(raw, active, rounding, Delivery::Notify);
    }

    pub(crate) fn end_drag(&mut self) {
        let Some(session) = self.leave_drag() else {
            return;
        };
        let value = self.model.value();
        debug!(active = session.active, ?value, "drag ended");
        self.config.observer.on_end(value);
        if value != session.start_value {
            self.host.dispatch(Notification::Change);
        }
    }

    /// Cancels a gesture without notifying anyone.
    pub(crate) fn abort_drag(&mut self) {
        if let Some(session) = self.leave_drag() {
            trace!(active = session.active, "drag aborted");
        }
    }

    fn leave_drag(&mut self) -> Option<DragSession> {
        let InteractionState::Dragging(session) = mem::take(&mut self.state) else {
            return None;
        };
        self.subscriptions.unsubscribe_all(&mut self.host, DRAG_SOURCES);
        self.host.set_flag(VisualFlag::ActiveHandle(session.active), false);
        self.host.set_flag(VisualFlag::Dragging, false);
        self.tooltips.set_interacting(&mut self.host, false);
        Some(session)
    }

    pub(crate) fn key_step(&mut self, handle: usize, key: Key) {
        let Some(steps) = key.steps(self.axis) else {
            return;
        };
        if !self.enabled || handle >= self.model.handles() || self.config.is_locked(handle) {
            trace!(handle, ?key, "key ignored");
            return;
        }
        let before = self.model.value();
        let changed = self.model.step_by(steps, Some(handle));
        self.commit(handle, changed, Delivery::Notify);
        if changed {
            self.host.dispatch(Notification::Change);
        }
        trace!(handle, steps, ?before, value = ?self.model.value(), "key step");
    }

    fn raw_value_at(&self, position: PxPosition) -> f64 {
        self.mapper().offset_to_value(self.axis.coordinate(position))
    }
}

#[cfg(test)]
mod tests {
    use smallvec::SmallVec;

    use super::*;
    use crate::px::PxRect;

    fn rects(first: f64, second: f64) -> GeometryRects {
        GeometryRects {
            container: PxRect::new(0.0, 0.0, 200.0, 16.0),
            handles: SmallVec::from_slice(&[
                PxRect::new(first, 0.0, 16.0, 16.0),
                PxRect::new(second, 0.0, 16.0, 16.0),
            ]),
        }
    }

    fn at(x: f64) -> PxPosition {
        PxPosition::new(x, 8.0)
    }

    #[test]
    fn press_on_handle_selects_it() {
        let geometry = rects(20.0, 120.0);
        let pick = |x| select_handle(&geometry, Axis::Horizontal, at(x), 2, |_| false);
        assert_eq!(pick(25.0), Some(0));
        assert_eq!(pick(125.0), Some(1));
    }

    #[test]
    fn press_on_track_selects_nearest_leading_edge() {
        let geometry = rects(20.0, 120.0);
        let pick = |x| select_handle(&geometry, Axis::Horizontal, at(x), 2, |_| false);
        assert_eq!(pick(60.0), Some(0));
        assert_eq!(pick(100.0), Some(1));
        assert_eq!(pick(70.0), Some(0));
    }

    #[test]
    fn stacked_handles_resolve_to_the_top_one() {
        let geometry = rects(100.0, 100.0);
        let picked = select_handle(&geometry, Axis::Horizontal, at(108.0), 2, |_| false);
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn locked_handles_are_skipped_or_block() {
        let geometry = rects(20.0, 120.0);
        let locked_first = |index: usize| index == 0;
        assert_eq!(
            select_handle(&geometry, Axis::Horizontal, at(60.0), 2, locked_first),
            Some(1)
        );
        assert_eq!(
            select_handle(&geometry, Axis::Horizontal, at(25.0), 2, locked_first),
            None
        );
        assert_eq!(
            select_handle(&geometry, Axis::Horizontal, at(60.0), 2, |_| true),
            None
        );
        assert_eq!(
            select_handle(&geometry, Axis::Horizontal, at(60.0), 1, |_| true),
            None
        );
        assert_eq!(
            select_handle(&geometry, Axis::Horizontal, at(60.0), 1, |_| false),
            Some(0)
        );
    }

    #[test]
    fn rounding_follows_direction_of_travel() {
        let mut session = DragSession::new(0, SliderValue::Single(0.0));
        assert_eq!(session.advance(47.0), Rounding::Up);
        assert_eq!(session.advance(44.0), Rounding::Down);
        assert_eq!(session.advance(44.0), Rounding::Down);
        assert_eq!(session.advance(46.0), Rounding::Up);
        assert_eq!(session.last_raw, Some(46.0));
    }

    #[test]
    fn state_reports_active_handle() {
        let state = InteractionState::Dragging(DragSession::new(1, SliderValue::Double([0.0, 1.0])));
        assert!(state.is_dragging());
        assert_eq!(state.active_handle(), Some(1));
        assert_eq!(InteractionState::default().active_handle(), None);
    }
}
