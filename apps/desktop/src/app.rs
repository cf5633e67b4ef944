//! Demo host wiring the clip selector to a simulated media transport

use std::time::{Duration, Instant};

use iced::widget::{button, column, container, row, text};
use iced::{executor, time, Application, Command, Element, Length, Subscription, Theme};
use tracing::{debug, info};

use trimline_core::{format_clip_time, ClipEdge, Command as SelectorCommand, Notification};
use trimline_ui::{
    preview_button, sync_button, ClipSelectorWidget, PreviewController, SelectorEvent, SyncButton,
};

/// Demo media length in seconds.
const DEMO_DURATION: f64 = 300.0;
/// Simulated playback clock tick.
const TICK: Duration = Duration::from_millis(200);

pub struct TrimlineApp {
    selector: ClipSelectorWidget,
    preview: PreviewController,
    sync_start: SyncButton,
    sync_end: SyncButton,
    transport: Transport,
}

/// Stand-in for the host media element.
///
/// The selector and the collaborator buttons only ever talk to it through
/// the seek/play/pause request contract; it owns duration, current time,
/// and the paused flag the same way a real media element would.
struct Transport {
    duration: f64,
    current_time: f64,
    paused: bool,
}

impl Transport {
    fn new(duration: f64) -> Self {
        Self {
            duration,
            current_time: 0.0,
            paused: true,
        }
    }

    fn seek(&mut self, time: f64) {
        self.current_time = time.clamp(0.0, self.duration);
    }

    fn advance(&mut self, secs: f64) {
        if self.paused {
            return;
        }
        self.current_time = (self.current_time + secs).min(self.duration);
        if self.current_time >= self.duration {
            self.paused = true;
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Selector(SelectorEvent),
    Tick(Instant),
    TogglePlayback,
    PreviewClip,
    SyncEdge(ClipEdge),
}

impl Application for TrimlineApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        info!("Initializing Trimline demo host");

        let mut selector = ClipSelectorWidget::new();
        selector.apply(SelectorCommand::SetDuration(DEMO_DURATION));

        (
            Self {
                selector,
                preview: PreviewController::new(),
                sync_start: SyncButton::new(ClipEdge::Start),
                sync_end: SyncButton::new(ClipEdge::End),
                transport: Transport::new(DEMO_DURATION),
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        "Trimline - Clip Selector".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Selector(event) => {
                if let Some(notification) = self.selector.update(event) {
                    self.handle_notification(notification);
                }
            }
            Message::Tick(_) => {
                self.transport.advance(TICK.as_secs_f64());
                if self.transport.paused {
                    // Reached the end of the media.
                    self.selector.apply(SelectorCommand::SetPaused(true));
                }
                self.observe_time();
            }
            Message::TogglePlayback => {
                self.transport.paused = !self.transport.paused;
                self.selector
                    .apply(SelectorCommand::SetPaused(self.transport.paused));
            }
            Message::PreviewClip => {
                let requests = self
                    .preview
                    .invoke(self.selector.bounds(), self.transport.current_time);
                for notification in requests {
                    self.handle_notification(notification);
                }
            }
            Message::SyncEdge(edge) => {
                let sync = match edge {
                    ClipEdge::Start => self.sync_start,
                    ClipEdge::End => self.sync_end,
                };
                let notification = sync.invoke(self.transport.current_time);
                self.handle_notification(notification);
            }
        }
        Command::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let bounds = self.selector.bounds();
        let clip_label = text(format!(
            "Clip {} - {}",
            format_clip_time(bounds.start_time),
            format_clip_time(bounds.end_time)
        ))
        .size(16);
        let position_label = text(format!(
            "Playhead {}",
            format_clip_time(self.transport.current_time)
        ))
        .size(16);

        let play_label = if self.transport.paused { "Play" } else { "Pause" };
        let controls = row![
            button(play_label).on_press(Message::TogglePlayback),
            preview_button(Message::PreviewClip, self.preview.is_playing()),
            sync_button(ClipEdge::Start, Message::SyncEdge(ClipEdge::Start)),
            sync_button(ClipEdge::End, Message::SyncEdge(ClipEdge::End)),
        ]
        .spacing(10);

        let content = column![
            self.selector.view().map(Message::Selector),
            row![clip_label, position_label].spacing(20),
            controls,
        ]
        .spacing(16)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y()
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.transport.paused {
            Subscription::none()
        } else {
            time::every(TICK).map(Message::Tick)
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

impl TrimlineApp {
    /// Propagate a transport time change to every observer, honoring any
    /// requests they raise.
    fn observe_time(&mut self) {
        let current = self.transport.current_time;
        if let Some(notification) = self
            .selector
            .apply(SelectorCommand::SetCurrentTime(current))
        {
            self.handle_notification(notification);
        }
        if let Some(notification) = self.preview.observe_time(self.selector.bounds(), current) {
            self.handle_notification(notification);
        }
    }

    /// Honor one outbound request the way a host media element would.
    fn handle_notification(&mut self, notification: Notification) {
        match notification {
            Notification::Update(bounds) => {
                debug!(
                    start = bounds.start_time,
                    end = bounds.end_time,
                    "clip bounds updated"
                );
            }
            Notification::SeekRequest(time) => {
                self.transport.seek(time);
                self.observe_time();
            }
            Notification::PlayRequest => {
                self.transport.paused = false;
                self.selector.apply(SelectorCommand::SetPaused(false));
            }
            Notification::PauseRequest => {
                self.transport.paused = true;
                self.selector.apply(SelectorCommand::SetPaused(true));
            }
            Notification::ClipSyncRequest(detail) => {
                if let Some(update) = self.selector.sync_clip_time(detail.name, detail.value) {
                    self.handle_notification(update);
                }
            }
        }
    }
}
