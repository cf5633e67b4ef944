//! The inbound command / outbound notification contract with the host
//!
//! Attribute observers, pointer listeners, and the auxiliary buttons all
//! funnel through these two enums; the engine never talks to the host any
//! other way. Payload field names are part of the interop contract and
//! serialize camelCase.

use serde::{Deserialize, Serialize};

use crate::drag::HitTarget;
use crate::error::SelectorResult;
use crate::geometry::{PointerInput, TrackGeometry};
use crate::selection::ClipBounds;

/// Which clip edge an external sync command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipEdge {
    Start,
    End,
}

/// Payload of a clip-sync request from the auxiliary sync button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipSyncDetail {
    pub name: ClipEdge,
    pub value: f64,
}

/// Inbound surface of the selector engine.
///
/// Pointer commands carry the track geometry they were measured against
/// so layout is always read fresh, never cached across drags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Pointer went down on the given visual element.
    PointerDown {
        target: HitTarget,
        input: PointerInput,
    },
    /// Pointer moved; applies only while a drag session is active.
    PointerMove {
        input: PointerInput,
        track: TrackGeometry,
    },
    /// Pointer released, anywhere, including outside the widget.
    PointerUp,
    /// Defensive clear for a missed pointer-up (cursor left the window,
    /// focus lost).
    CancelDrag,
    /// Click on the track; seeks when it lands inside the selection.
    Click {
        input: PointerInput,
        track: TrackGeometry,
    },
    /// Host media duration changed.
    SetDuration(f64),
    /// Host playback position changed.
    SetCurrentTime(f64),
    /// Host paused state changed.
    SetPaused(bool),
    /// External override of one clip edge (sync-button command).
    SetClipTime {
        edge: ClipEdge,
        value: f64,
        track: TrackGeometry,
    },
}

/// Outbound notifications.
///
/// `Update` and `SeekRequest` originate in the engine; the play/pause and
/// clip-sync requests originate in the collaborator buttons but share the
/// same vocabulary so the host honors one contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "kebab-case")]
pub enum Notification {
    /// The selection changed; carries the freshly announced bounds.
    Update(ClipBounds),
    /// The host should seek to the given time in seconds.
    SeekRequest(f64),
    /// The host should resume playback.
    PlayRequest,
    /// The host should pause playback.
    PauseRequest,
    /// A collaborator asks for a bounds override.
    ClipSyncRequest(ClipSyncDetail),
}

impl Notification {
    /// JSON detail payload matching the host event contract (camelCase
    /// names, seconds as units).
    pub fn detail_json(&self) -> SelectorResult<String> {
        let json = match self {
            Notification::Update(bounds) => serde_json::to_string(bounds)?,
            Notification::SeekRequest(time) => serde_json::to_string(time)?,
            Notification::ClipSyncRequest(detail) => serde_json::to_string(detail)?,
            Notification::PlayRequest | Notification::PauseRequest => "null".to_owned(),
        };
        Ok(json)
    }
}
