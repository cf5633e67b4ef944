//! Sync-to-current-time collaborator
//!
//! Snaps one clip edge to the playhead by emitting a clip-sync request;
//! the host routes the request back into the selector as the matching
//! set command.

use iced::widget::button;

use trimline_core::{ClipEdge, ClipSyncDetail, Notification};

/// Emitter for one edge's sync requests.
#[derive(Debug, Clone, Copy)]
pub struct SyncButton {
    edge: ClipEdge,
}

impl SyncButton {
    pub fn new(edge: ClipEdge) -> Self {
        Self { edge }
    }

    pub fn edge(&self) -> ClipEdge {
        self.edge
    }

    /// Button pressed at the given playhead position.
    pub fn invoke(&self, current_time: f64) -> Notification {
        Notification::ClipSyncRequest(ClipSyncDetail {
            name: self.edge,
            value: current_time,
        })
    }
}

/// The sync button itself.
pub fn sync_button<Message: Clone>(
    edge: ClipEdge,
    on_press: Message,
) -> button::Button<'static, Message> {
    let label = match edge {
        ClipEdge::Start => "Set start",
        ClipEdge::End => "Set end",
    };
    button(label)
        .style(iced::theme::Button::Secondary)
        .on_press(on_press)
}
