//! Play-clip collaborator
//!
//! Plays back only the selected clip: seeks to the clip start, asks the
//! host to play, and asks it to pause once the playhead reaches the clip
//! end. Talks to the host through the same notification contract as the
//! selector itself.

use iced::widget::button;

use trimline_core::{ClipBounds, Notification};

/// State machine behind the preview button.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewController {
    playing: bool,
}

impl PreviewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a clip preview is currently running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Button pressed. A no-op while a preview is already running.
    ///
    /// Emits a seek to the clip start when the playhead is elsewhere,
    /// then a play request.
    pub fn invoke(&mut self, bounds: ClipBounds, current_time: f64) -> Vec<Notification> {
        if self.playing {
            return Vec::new();
        }
        self.playing = true;

        let mut requests = Vec::with_capacity(2);
        if current_time != bounds.start_time {
            requests.push(Notification::SeekRequest(bounds.start_time));
        }
        requests.push(Notification::PlayRequest);
        requests
    }

    /// The host reported a new current time; stop at the clip end.
    pub fn observe_time(&mut self, bounds: ClipBounds, current_time: f64) -> Option<Notification> {
        if !self.playing {
            return None;
        }
        if bounds.end_time > 0.0 && current_time >= bounds.end_time {
            self.playing = false;
            return Some(Notification::PauseRequest);
        }
        None
    }
}

/// The preview button itself; disabled while a preview runs.
pub fn preview_button<Message: Clone>(
    on_press: Message,
    playing: bool,
) -> button::Button<'static, Message> {
    let label = if playing { "Previewing..." } else { "Preview clip" };
    let base = button(label).style(iced::theme::Button::Primary);
    if playing {
        base
    } else {
        base.on_press(on_press)
    }
}
