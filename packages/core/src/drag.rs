//! Drag session state for the two trim handles

/// Which handle a drag session owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    StartHandle,
    EndHandle,
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Track background outside the selection.
    Track,
    /// The start trim handle.
    StartHandle,
    /// The end trim handle.
    EndHandle,
    /// Inside the selection span, between the handles.
    SelectionBody,
}

/// Ephemeral per-drag state.
///
/// Exists only between a pointer-down on a handle and the next
/// pointer-up; dragging the track or selection body never creates one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: DragTarget,
    /// Reference X for the incremental delta; refreshed after every move
    /// so no move is ever computed against a stale origin.
    pub initial_x: f32,
}

impl DragSession {
    /// Start a session if the pointer-down hit a handle
    pub fn begin(target: HitTarget, x: f32) -> Option<Self> {
        let target = match target {
            HitTarget::StartHandle => DragTarget::StartHandle,
            HitTarget::EndHandle => DragTarget::EndHandle,
            HitTarget::Track | HitTarget::SelectionBody => return None,
        };
        Some(Self {
            target,
            initial_x: x,
        })
    }

    /// Distance moved since the last reference point; advances the
    /// reference to the given position.
    pub fn take_delta(&mut self, x: f32) -> f32 {
        let delta = x - self.initial_x;
        self.initial_x = x;
        delta
    }
}
