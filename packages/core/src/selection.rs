//! Fraction-authoritative selection model
//!
//! The model stores the left-trim fraction and the selection-span
//! fraction; pixel widths are always derived from these, never read back
//! from the rendered widget. That keeps handle positions a deterministic
//! function of `(Selection, TrackGeometry)` with no accumulated pixel
//! state to drift.

use serde::{Deserialize, Serialize};

use crate::geometry::{clamp_unit, fraction_to_time};

/// Sentinel for "selection end not yet known" while the duration is unset.
pub const UNSET_TIME: f64 = -1.0;

/// Width of a trim handle in track pixels.
pub const HANDLE_WIDTH: f32 = 8.0;

/// Announced clip bounds, in whole seconds.
///
/// Field names serialize camelCase because the payload is an interop
/// contract with the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipBounds {
    pub start_time: f64,
    pub end_time: f64,
}

/// The persisted clip selection.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    /// Track fraction left of the selection (time 0 to `start_time`).
    left_trim: f32,
    /// Track fraction covered by the selection span.
    span: f32,
    /// Media duration in seconds; `0` means unknown.
    duration: f64,
    /// Last announced start bound.
    start_time: f64,
    /// Last announced end bound, or [`UNSET_TIME`].
    end_time: f64,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionModel {
    /// A full-width selection over an unknown duration
    pub fn new() -> Self {
        Self {
            left_trim: 0.0,
            span: 1.0,
            duration: 0.0,
            start_time: 0.0,
            end_time: UNSET_TIME,
        }
    }

    /// Reset to the attach-time state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Media duration in seconds; `0` while unknown
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether a usable duration has been supplied
    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Fraction of the track left of the selection
    pub fn left_trim(&self) -> f32 {
        self.left_trim
    }

    /// Fraction of the track covered by the selection
    pub fn span(&self) -> f32 {
        self.span
    }

    /// Accept a duration from the host.
    ///
    /// Anything that is not a finite positive number counts as unknown.
    /// Transitions between known and unknown re-derive the bounds instead
    /// of preserving stale fractions: losing the duration resets the
    /// selection to the full track with the end at [`UNSET_TIME`], gaining
    /// one recomputes real bounds from the current fractions.
    pub fn set_duration(&mut self, value: f64) {
        let next = if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        };
        if next == self.duration {
            return;
        }
        self.duration = next;
        if self.has_duration() {
            self.commit_bounds();
        } else {
            self.left_trim = 0.0;
            self.span = 1.0;
            self.start_time = 0.0;
            self.end_time = UNSET_TIME;
        }
    }

    /// Set the left-trim fraction directly (start-handle drags)
    pub fn set_left_trim(&mut self, fraction: f32) {
        self.left_trim = clamp_unit(fraction);
    }

    /// Set the selection-span fraction, enforcing the minimum width.
    ///
    /// The floor is `clamp(-handle_width / track_width, 0, 1)`: the span
    /// may shrink to the negative-handle-width allowance but never below
    /// it.
    pub fn set_span_fraction(&mut self, fraction: f32, track_width: f32, handle_width: f32) {
        let min_fraction = if track_width > 0.0 {
            clamp_unit(-handle_width / track_width)
        } else {
            0.0
        };
        self.span = fraction.clamp(min_fraction, 1.0);
    }

    /// Bounds derived from the current fractions, rounded to whole
    /// seconds and clamped into `[0, duration]`.
    ///
    /// Rounding may collapse `start == end` at minimum width; that is
    /// allowed.
    pub fn derived_bounds(&self) -> ClipBounds {
        let start_fraction = clamp_unit(self.left_trim);
        let end_fraction = clamp_unit(self.left_trim + self.span);
        let end = fraction_to_time(end_fraction, self.duration)
            .round()
            .clamp(0.0, self.duration);
        let start = fraction_to_time(start_fraction, self.duration)
            .round()
            .clamp(0.0, end);
        ClipBounds {
            start_time: start,
            end_time: end,
        }
    }

    /// Recompute the bounds, cache them as the announced values, and hand
    /// back exactly what must be dispatched.
    ///
    /// The cached values always equal the last announced ones, never a
    /// partially-applied state.
    pub fn commit_bounds(&mut self) -> ClipBounds {
        let bounds = self.derived_bounds();
        self.start_time = bounds.start_time;
        self.end_time = bounds.end_time;
        bounds
    }

    /// The last announced bounds
    pub fn bounds(&self) -> ClipBounds {
        ClipBounds {
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Whether a timestamp lies inside the announced selection
    pub fn is_within(&self, timestamp: f64) -> bool {
        self.start_time <= timestamp && timestamp <= self.end_time
    }
}
