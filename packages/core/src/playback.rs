//! Playback sync controller
//!
//! Mirrors the host media element's playback state, keeps the playhead
//! fraction current, and loops playback back to the selection start when
//! the current time leaves the selected range.

use tracing::debug;

use crate::geometry::time_to_fraction;
use crate::selection::SelectionModel;

/// Read-only mirror of the host playback state plus the derived playhead.
#[derive(Debug, Clone)]
pub struct PlaybackSync {
    current_time: f64,
    paused: bool,
    playhead_fraction: f32,
    playhead_visible: bool,
    /// True between emitting a loop-back seek and the next in-bounds
    /// observation; suppresses request storms while the host catches up.
    seek_pending: bool,
}

impl Default for PlaybackSync {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSync {
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            paused: true,
            playhead_fraction: 0.0,
            playhead_visible: false,
            seek_pending: false,
        }
    }

    /// Last observed playback position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Whether the host reported itself paused
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Playhead position as a track fraction
    pub fn playhead_fraction(&self) -> f32 {
        self.playhead_fraction
    }

    /// Whether the playhead should be rendered
    pub fn playhead_visible(&self) -> bool {
        self.playhead_visible
    }

    /// Host paused state changed.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            // The next unpause starts from a fresh out-of-bounds
            // observation rather than a leftover in-flight seek.
            self.seek_pending = false;
        }
    }

    /// A new current time was observed. Returns the loop-back seek target
    /// when playback just left the selection.
    ///
    /// Emits at most one seek per range exit: the pending flag set here is
    /// cleared only once the current time is observed inside the selection
    /// again.
    pub fn observe_time(&mut self, time: f64, selection: &SelectionModel) -> Option<f64> {
        self.current_time = time;
        if !selection.has_duration() {
            self.playhead_visible = false;
            return None;
        }
        self.playhead_fraction = time_to_fraction(time, selection.duration());
        self.playhead_visible = true;

        if self.paused {
            return None;
        }

        let bounds = selection.bounds();
        if time < bounds.start_time || time > bounds.end_time {
            if self.seek_pending {
                return None;
            }
            self.seek_pending = true;
            debug!(
                time,
                start = bounds.start_time,
                end = bounds.end_time,
                "playback left the selection, looping to start"
            );
            Some(bounds.start_time)
        } else {
            self.seek_pending = false;
            None
        }
    }
}
