//! The selector engine
//!
//! One inbound [`Command`] goes in, at most one outbound [`Notification`]
//! comes out, and every state change runs synchronously inside that call.
//! Drag updates and external sync commands serialize through the same
//! commit-and-announce path, so the cached bounds always equal what was
//! last announced.

use tracing::{debug, trace};

use crate::drag::{DragSession, DragTarget, HitTarget};
use crate::event::{ClipEdge, Command, Notification};
use crate::geometry::{self, PointerInput, TrackGeometry};
use crate::playback::PlaybackSync;
use crate::selection::{ClipBounds, SelectionModel, HANDLE_WIDTH};

/// The clip selector engine: selection model, drag state machine, and
/// playback sync behind a single command gateway.
#[derive(Debug, Clone)]
pub struct ClipSelector {
    selection: SelectionModel,
    playback: PlaybackSync,
    drag: Option<DragSession>,
    handle_width: f32,
}

impl Default for ClipSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipSelector {
    pub fn new() -> Self {
        Self {
            selection: SelectionModel::new(),
            playback: PlaybackSync::new(),
            drag: None,
            handle_width: HANDLE_WIDTH,
        }
    }

    /// The selection model (read-only)
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// The playback mirror (read-only)
    pub fn playback(&self) -> &PlaybackSync {
        &self.playback
    }

    /// Last announced clip bounds
    pub fn bounds(&self) -> ClipBounds {
        self.selection.bounds()
    }

    /// The handle being dragged, if a session is active
    pub fn dragging(&self) -> Option<DragTarget> {
        self.drag.map(|session| session.target)
    }

    /// Reset to the attach-time state
    pub fn reset(&mut self) {
        self.selection.reset();
        self.playback = PlaybackSync::new();
        self.drag = None;
    }

    /// Apply one inbound command.
    ///
    /// Never fails: malformed values clamp, impossible commands no-op.
    pub fn update(&mut self, command: Command) -> Option<Notification> {
        match command {
            Command::PointerDown { target, input } => self.pointer_down(target, input),
            Command::PointerMove { input, track } => self.pointer_move(input, track),
            Command::PointerUp | Command::CancelDrag => {
                self.drag = None;
                None
            }
            Command::Click { input, track } => self.click(input, track),
            Command::SetDuration(value) => {
                self.selection.set_duration(value);
                None
            }
            Command::SetCurrentTime(value) => self
                .playback
                .observe_time(value, &self.selection)
                .map(Notification::SeekRequest),
            Command::SetPaused(paused) => {
                self.playback.set_paused(paused);
                None
            }
            Command::SetClipTime { edge, value, track } => self.sync_clip_time(edge, value, track),
        }
    }

    fn pointer_down(&mut self, target: HitTarget, input: PointerInput) -> Option<Notification> {
        // Handle identity is resolved fresh on every press, so a stale
        // session from a missed pointer-up cannot survive this call.
        self.drag = DragSession::begin(target, input.x());
        if let Some(session) = self.drag {
            debug!(target = ?session.target, x = session.initial_x, "drag started");
        }
        None
    }

    fn pointer_move(&mut self, input: PointerInput, track: TrackGeometry) -> Option<Notification> {
        // A move without an active session is a no-op, not an error.
        let session = self.drag.as_mut()?;
        if !self.selection.has_duration() || track.width <= 0.0 {
            return None;
        }

        let x = input.x();
        let x_delta = session.take_delta(x);
        let fraction = geometry::position_to_fraction(x, track);
        // Selection width in pixels is derived from the model fraction,
        // never read back from the rendered widget, so repeated moves
        // cannot accumulate drift.
        let span_px = self.selection.span() * track.width;
        let target = session.target;

        match target {
            DragTarget::StartHandle => {
                self.selection.set_left_trim(fraction);
                let next = geometry::clamp_unit((span_px - x_delta) / track.width);
                self.selection
                    .set_span_fraction(next, track.width, self.handle_width);
            }
            DragTarget::EndHandle => {
                let next = geometry::clamp_unit((span_px + x_delta) / track.width);
                self.selection
                    .set_span_fraction(next, track.width, self.handle_width);
            }
        }
        trace!(?target, x, x_delta, "drag move");
        Some(Notification::Update(self.selection.commit_bounds()))
    }

    fn click(&mut self, input: PointerInput, track: TrackGeometry) -> Option<Notification> {
        if !self.selection.has_duration() {
            return None;
        }
        let fraction = geometry::position_to_fraction(input.x(), track);
        let timestamp = geometry::fraction_to_time(fraction, self.selection.duration());
        // Only clicks inside the selection move the playhead; out-of-range
        // clicks neither seek nor alter the selection.
        if self.selection.is_within(timestamp) {
            debug!(timestamp, "click inside selection, requesting seek");
            Some(Notification::SeekRequest(timestamp))
        } else {
            None
        }
    }

    fn sync_clip_time(
        &mut self,
        edge: ClipEdge,
        value: f64,
        track: TrackGeometry,
    ) -> Option<Notification> {
        if !self.selection.has_duration() {
            return None;
        }
        let duration = self.selection.duration();
        // A malformed external set is recoverable input: clamp, don't fail.
        let value = value.clamp(0.0, duration);
        let bounds = self.selection.bounds();

        match edge {
            ClipEdge::Start => {
                self.selection
                    .set_left_trim(geometry::time_to_fraction(value, duration));
                let span = geometry::time_to_fraction(bounds.end_time - value, duration);
                self.selection
                    .set_span_fraction(span, track.width, self.handle_width);
            }
            ClipEdge::End => {
                let span = geometry::time_to_fraction(value - bounds.start_time, duration);
                self.selection
                    .set_span_fraction(span, track.width, self.handle_width);
            }
        }
        debug!(?edge, value, "external clip sync");
        Some(Notification::Update(self.selection.commit_bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: TrackGeometry = TrackGeometry {
        left: 0.0,
        width: 1000.0,
    };

    fn selector_with_duration(duration: f64) -> ClipSelector {
        let mut selector = ClipSelector::new();
        selector.update(Command::SetDuration(duration));
        selector
    }

    fn press(selector: &mut ClipSelector, target: HitTarget, x: f32) {
        selector.update(Command::PointerDown {
            target,
            input: PointerInput::mouse(x),
        });
    }

    fn drag_to(selector: &mut ClipSelector, x: f32) -> Option<Notification> {
        selector.update(Command::PointerMove {
            input: PointerInput::mouse(x),
            track: TRACK,
        })
    }

    #[test]
    fn test_drag_requires_handle_target() {
        let mut selector = selector_with_duration(100.0);
        press(&mut selector, HitTarget::SelectionBody, 500.0);
        assert_eq!(selector.dragging(), None);
        assert_eq!(drag_to(&mut selector, 600.0), None);

        press(&mut selector, HitTarget::Track, 500.0);
        assert_eq!(drag_to(&mut selector, 600.0), None);
    }

    #[test]
    fn test_pointer_up_ends_drag() {
        let mut selector = selector_with_duration(100.0);
        press(&mut selector, HitTarget::EndHandle, 1000.0);
        assert_eq!(selector.dragging(), Some(DragTarget::EndHandle));
        selector.update(Command::PointerUp);
        assert_eq!(selector.dragging(), None);
        assert_eq!(drag_to(&mut selector, 500.0), None);
    }

    #[test]
    fn test_stale_session_resolved_on_next_press() {
        let mut selector = selector_with_duration(100.0);
        press(&mut selector, HitTarget::StartHandle, 0.0);
        // The pointer-up was missed; the next press on a non-handle must
        // not keep the old session alive.
        press(&mut selector, HitTarget::Track, 400.0);
        assert_eq!(selector.dragging(), None);
    }

    #[test]
    fn test_start_handle_drag_moves_start_time() {
        let mut selector = selector_with_duration(100.0);
        press(&mut selector, HitTarget::StartHandle, 0.0);
        let notification = drag_to(&mut selector, 200.0);
        assert_eq!(
            notification,
            Some(Notification::Update(ClipBounds {
                start_time: 20.0,
                end_time: 100.0,
            }))
        );
    }

    #[test]
    fn test_end_handle_drag_moves_end_time() {
        let mut selector = selector_with_duration(100.0);
        press(&mut selector, HitTarget::EndHandle, 1000.0);
        let notification = drag_to(&mut selector, 700.0);
        assert_eq!(
            notification,
            Some(Notification::Update(ClipBounds {
                start_time: 0.0,
                end_time: 70.0,
            }))
        );
    }

    #[test]
    fn test_incremental_moves_do_not_drift() {
        let mut selector = selector_with_duration(100.0);
        press(&mut selector, HitTarget::EndHandle, 1000.0);
        drag_to(&mut selector, 900.0);
        drag_to(&mut selector, 800.0);
        let notification = drag_to(&mut selector, 700.0);
        assert_eq!(
            notification,
            Some(Notification::Update(ClipBounds {
                start_time: 0.0,
                end_time: 70.0,
            }))
        );
    }

    #[test]
    fn test_end_handle_cannot_cross_minimum_width() {
        let mut selector = selector_with_duration(100.0);
        press(&mut selector, HitTarget::EndHandle, 1000.0);
        drag_to(&mut selector, -500.0);
        assert!(selector.selection().span() >= 0.0);
        let bounds = selector.bounds();
        assert!(bounds.start_time <= bounds.end_time);
    }

    #[test]
    fn test_drag_without_duration_is_silent() {
        let mut selector = ClipSelector::new();
        press(&mut selector, HitTarget::StartHandle, 0.0);
        assert_eq!(drag_to(&mut selector, 300.0), None);
        let bounds = selector.bounds();
        assert_eq!(bounds.start_time, 0.0);
        assert_eq!(bounds.end_time, crate::selection::UNSET_TIME);
    }

    #[test]
    fn test_drag_with_zero_width_track_is_silent() {
        let mut selector = selector_with_duration(100.0);
        press(&mut selector, HitTarget::StartHandle, 0.0);
        let notification = selector.update(Command::PointerMove {
            input: PointerInput::mouse(50.0),
            track: TrackGeometry::new(0.0, 0.0),
        });
        assert_eq!(notification, None);
    }

    #[test]
    fn test_click_inside_selection_seeks() {
        let mut selector = selector_with_duration(60.0);
        selector.update(Command::SetClipTime {
            edge: ClipEdge::Start,
            value: 10.0,
            track: TRACK,
        });
        selector.update(Command::SetClipTime {
            edge: ClipEdge::End,
            value: 50.0,
            track: TRACK,
        });

        let notification = selector.update(Command::Click {
            input: PointerInput::mouse(500.0),
            track: TRACK,
        });
        assert_eq!(notification, Some(Notification::SeekRequest(30.0)));
    }

    #[test]
    fn test_click_outside_selection_is_ignored() {
        let mut selector = selector_with_duration(60.0);
        selector.update(Command::SetClipTime {
            edge: ClipEdge::Start,
            value: 10.0,
            track: TRACK,
        });
        selector.update(Command::SetClipTime {
            edge: ClipEdge::End,
            value: 50.0,
            track: TRACK,
        });

        let notification = selector.update(Command::Click {
            input: PointerInput::mouse(50.0),
            track: TRACK,
        });
        assert_eq!(notification, None);
    }

    #[test]
    fn test_click_without_duration_is_ignored() {
        let mut selector = ClipSelector::new();
        let notification = selector.update(Command::Click {
            input: PointerInput::mouse(500.0),
            track: TRACK,
        });
        assert_eq!(notification, None);
    }

    #[test]
    fn test_sync_clamps_out_of_range_value() {
        let mut selector = selector_with_duration(150.0);
        let notification = selector.update(Command::SetClipTime {
            edge: ClipEdge::End,
            value: 200.0,
            track: TRACK,
        });
        assert_eq!(
            notification,
            Some(Notification::Update(ClipBounds {
                start_time: 0.0,
                end_time: 150.0,
            }))
        );
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut selector = selector_with_duration(100.0);
        let first = selector.update(Command::SetClipTime {
            edge: ClipEdge::Start,
            value: 25.0,
            track: TRACK,
        });
        let second = selector.update(Command::SetClipTime {
            edge: ClipEdge::Start,
            value: 25.0,
            track: TRACK,
        });
        assert_eq!(first, second);
        assert_eq!(selector.bounds().start_time, 25.0);
    }

    #[test]
    fn test_ordering_invariant_holds_through_drags() {
        let mut selector = selector_with_duration(90.0);
        press(&mut selector, HitTarget::StartHandle, 0.0);
        for x in [100.0, 450.0, 900.0, 1200.0, 300.0] {
            drag_to(&mut selector, x);
            let bounds = selector.bounds();
            assert!(bounds.start_time >= 0.0);
            assert!(bounds.start_time <= bounds.end_time);
            assert!(bounds.end_time <= 90.0);
        }
    }
}
