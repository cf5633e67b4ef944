//! Clip range selector widget
//!
//! Renders the trim track with its two handles, selection span and
//! playhead, and feeds pointer input into the core engine. All geometry
//! shown here is derived from the engine's fractions on every draw; the
//! widget keeps no pixel state of its own.

use iced::widget::canvas::{self, Canvas, Frame, Geometry, Program};
use iced::{mouse, touch, Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use trimline_core::{
    geometry::clamp_unit, ClipBounds, ClipEdge, ClipSelector, Command, HitTarget, Notification,
    PointerInput, TrackGeometry, HANDLE_WIDTH,
};

/// Widget height in pixels.
const SELECTOR_HEIGHT: f32 = 44.0;
/// Horizontal padding between the widget edge and the track.
const TRACK_PADDING: f32 = 10.0;
/// Track bar height.
const TRACK_HEIGHT: f32 = 10.0;
/// Playhead line width.
const PLAYHEAD_WIDTH: f32 = 3.0;
/// How far the pointer may travel between press and release to still
/// count as a click.
const CLICK_SLOP: f32 = 4.0;

/// Raw pointer events from the canvas; the widget resolves them into
/// engine commands.
#[derive(Debug, Clone, Copy)]
pub enum SelectorEvent {
    Pressed {
        input: PointerInput,
        track: TrackGeometry,
    },
    Moved {
        input: PointerInput,
        track: TrackGeometry,
    },
    Released {
        input: Option<PointerInput>,
        track: TrackGeometry,
    },
    /// Pointer left the window; clears any drag defensively.
    CursorLeft,
}

/// The clip selector widget: owns the engine and the click/drag
/// disambiguation state.
#[derive(Debug, Clone)]
pub struct ClipSelectorWidget {
    engine: ClipSelector,
    /// Where a non-handle press landed, pending click resolution.
    pressed_at: Option<f32>,
    /// Track geometry from the most recent canvas event, used for
    /// commands that arrive outside a pointer callback (external sync).
    track: TrackGeometry,
}

impl Default for ClipSelectorWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipSelectorWidget {
    pub fn new() -> Self {
        Self {
            engine: ClipSelector::new(),
            pressed_at: None,
            track: TrackGeometry::new(TRACK_PADDING, 800.0),
        }
    }

    /// The underlying engine (read-only)
    pub fn engine(&self) -> &ClipSelector {
        &self.engine
    }

    /// Last announced clip bounds
    pub fn bounds(&self) -> ClipBounds {
        self.engine.bounds()
    }

    /// Feed a host-side attribute change straight into the engine.
    pub fn apply(&mut self, command: Command) -> Option<Notification> {
        self.engine.update(command)
    }

    /// Override one clip edge from an external sync request.
    pub fn sync_clip_time(&mut self, edge: ClipEdge, value: f64) -> Option<Notification> {
        self.engine.update(Command::SetClipTime {
            edge,
            value,
            track: self.track,
        })
    }

    /// Apply one pointer event from the canvas.
    pub fn update(&mut self, event: SelectorEvent) -> Option<Notification> {
        match event {
            SelectorEvent::Pressed { input, track } => {
                self.track = track;
                let target = self.hit_target(input.x(), track);
                self.pressed_at = match target {
                    HitTarget::StartHandle | HitTarget::EndHandle => None,
                    HitTarget::Track | HitTarget::SelectionBody => Some(input.x()),
                };
                self.engine.update(Command::PointerDown { target, input })
            }
            SelectorEvent::Moved { input, track } => {
                self.track = track;
                // A genuine drag is not a click.
                if let Some(origin) = self.pressed_at {
                    if (input.x() - origin).abs() > CLICK_SLOP {
                        self.pressed_at = None;
                    }
                }
                self.engine.update(Command::PointerMove { input, track })
            }
            SelectorEvent::Released { input, track } => {
                self.track = track;
                self.engine.update(Command::PointerUp);
                match (self.pressed_at.take(), input) {
                    (Some(_), Some(input)) => self.engine.update(Command::Click { input, track }),
                    _ => None,
                }
            }
            SelectorEvent::CursorLeft => {
                self.pressed_at = None;
                self.engine.update(Command::CancelDrag)
            }
        }
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, SelectorEvent> {
        Canvas::new(SelectorProgram { widget: self })
            .width(Length::Fill)
            .height(Length::Fixed(SELECTOR_HEIGHT))
            .into()
    }

    /// Resolve a pointer X position against the rendered layout.
    ///
    /// The start handle sits just right of the selection's left edge and
    /// the end handle just left of its right edge, as rendered.
    fn hit_target(&self, x: f32, track: TrackGeometry) -> HitTarget {
        let selection = self.engine.selection();
        let start_x = track.left + selection.left_trim() * track.width;
        let end_x =
            track.left + clamp_unit(selection.left_trim() + selection.span()) * track.width;

        if x >= start_x && x <= start_x + HANDLE_WIDTH {
            HitTarget::StartHandle
        } else if x >= end_x - HANDLE_WIDTH && x <= end_x {
            HitTarget::EndHandle
        } else if x > start_x && x < end_x {
            HitTarget::SelectionBody
        } else {
            HitTarget::Track
        }
    }
}

/// Track geometry for a canvas laid out at `bounds` (absolute
/// coordinates, matching the positions iced reports for pointer events).
fn track_geometry(bounds: Rectangle) -> TrackGeometry {
    TrackGeometry::new(
        bounds.x + TRACK_PADDING,
        (bounds.width - 2.0 * TRACK_PADDING).max(0.0),
    )
}

/// Canvas program rendering the selector and forwarding pointer events
struct SelectorProgram<'a> {
    widget: &'a ClipSelectorWidget,
}

impl<'a> SelectorProgram<'a> {
    fn track_color(&self) -> Color {
        Color::from_rgb8(0xcc, 0xcc, 0xcc)
    }

    fn selection_color(&self) -> Color {
        // cornflowerblue
        Color::from_rgb8(0x64, 0x95, 0xed)
    }

    fn handle_color(&self) -> Color {
        // royalblue
        Color::from_rgb8(0x41, 0x69, 0xe1)
    }

    fn playhead_color(&self) -> Color {
        Color::from_rgb8(0xaa, 0xaa, 0xaa)
    }
}

impl<'a> Program<SelectorEvent> for SelectorProgram<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        // Drawing is in canvas-local coordinates; events use absolute
        // ones. Both derive positions from the same fractions.
        let track_width = (bounds.width - 2.0 * TRACK_PADDING).max(0.0);
        let left = TRACK_PADDING;
        let track_y = (bounds.height - TRACK_HEIGHT) / 2.0;

        frame.fill_rectangle(
            Point::new(left, track_y),
            Size::new(track_width, TRACK_HEIGHT),
            self.track_color(),
        );

        let selection = self.widget.engine.selection();
        let start_x = left + selection.left_trim() * track_width;
        let end_x = left + clamp_unit(selection.left_trim() + selection.span()) * track_width;

        // Selection span bar.
        let bar_height = bounds.height * 0.4;
        let bar_y = (bounds.height - bar_height) / 2.0;
        frame.fill_rectangle(
            Point::new(start_x, bar_y),
            Size::new((end_x - start_x).max(0.0), bar_height),
            self.selection_color(),
        );

        // Trim handles.
        let handle_height = bounds.height * 0.8;
        let handle_y = (bounds.height - handle_height) / 2.0;
        frame.fill_rectangle(
            Point::new(start_x, handle_y),
            Size::new(HANDLE_WIDTH, handle_height),
            self.handle_color(),
        );
        frame.fill_rectangle(
            Point::new((end_x - HANDLE_WIDTH).max(start_x), handle_y),
            Size::new(HANDLE_WIDTH, handle_height),
            self.handle_color(),
        );

        // Playhead, once a duration is known.
        let playback = self.widget.engine.playback();
        if playback.playhead_visible() {
            let playhead_x = left + playback.playhead_fraction() * track_width;
            frame.fill_rectangle(
                Point::new(playhead_x - PLAYHEAD_WIDTH / 2.0, 0.0),
                Size::new(PLAYHEAD_WIDTH, bounds.height),
                self.playhead_color(),
            );
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<SelectorEvent>) {
        let track = track_geometry(bounds);
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position() {
                    if bounds.contains(position) {
                        return (
                            canvas::event::Status::Captured,
                            Some(SelectorEvent::Pressed {
                                input: PointerInput::mouse(position.x),
                                track,
                            }),
                        );
                    }
                }
                (canvas::event::Status::Ignored, None)
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                // Moves are forwarded even when the cursor is outside the
                // widget so an active drag keeps tracking; the engine
                // drops them when no session is live.
                let status = if self.widget.engine.dragging().is_some() {
                    canvas::event::Status::Captured
                } else {
                    canvas::event::Status::Ignored
                };
                (
                    status,
                    Some(SelectorEvent::Moved {
                        input: PointerInput::mouse(position.x),
                        track,
                    }),
                )
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => (
                canvas::event::Status::Captured,
                Some(SelectorEvent::Released {
                    input: cursor.position().map(|p| PointerInput::mouse(p.x)),
                    track,
                }),
            ),
            canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                (canvas::event::Status::Ignored, Some(SelectorEvent::CursorLeft))
            }
            canvas::Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                if bounds.contains(position) {
                    (
                        canvas::event::Status::Captured,
                        Some(SelectorEvent::Pressed {
                            input: PointerInput::Touch { x: position.x },
                            track,
                        }),
                    )
                } else {
                    (canvas::event::Status::Ignored, None)
                }
            }
            canvas::Event::Touch(touch::Event::FingerMoved { position, .. }) => (
                canvas::event::Status::Captured,
                Some(SelectorEvent::Moved {
                    input: PointerInput::Touch { x: position.x },
                    track,
                }),
            ),
            canvas::Event::Touch(touch::Event::FingerLifted { position, .. }) => (
                canvas::event::Status::Captured,
                Some(SelectorEvent::Released {
                    input: Some(PointerInput::Touch { x: position.x }),
                    track,
                }),
            ),
            canvas::Event::Touch(touch::Event::FingerLost { .. }) => {
                (canvas::event::Status::Ignored, Some(SelectorEvent::CursorLeft))
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: TrackGeometry = TrackGeometry {
        left: 0.0,
        width: 1000.0,
    };

    fn widget_with_selection() -> ClipSelectorWidget {
        let mut widget = ClipSelectorWidget::new();
        widget.apply(Command::SetDuration(100.0));
        widget.update(SelectorEvent::Pressed {
            input: PointerInput::mouse(0.0),
            track: TRACK,
        });
        widget.update(SelectorEvent::Moved {
            input: PointerInput::mouse(200.0),
            track: TRACK,
        });
        widget.update(SelectorEvent::Released {
            input: Some(PointerInput::mouse(200.0)),
            track: TRACK,
        });
        widget
    }

    #[test]
    fn test_hit_target_resolution() {
        let widget = widget_with_selection();
        // Selection is now [20%, 100%] of a 1000px track.
        assert_eq!(widget.hit_target(204.0, TRACK), HitTarget::StartHandle);
        assert_eq!(widget.hit_target(996.0, TRACK), HitTarget::EndHandle);
        assert_eq!(widget.hit_target(500.0, TRACK), HitTarget::SelectionBody);
        assert_eq!(widget.hit_target(100.0, TRACK), HitTarget::Track);
    }

    #[test]
    fn test_drag_through_widget_announces_update() {
        let mut widget = ClipSelectorWidget::new();
        widget.apply(Command::SetDuration(100.0));

        assert!(widget
            .update(SelectorEvent::Pressed {
                input: PointerInput::mouse(0.0),
                track: TRACK,
            })
            .is_none());
        let notification = widget.update(SelectorEvent::Moved {
            input: PointerInput::mouse(200.0),
            track: TRACK,
        });
        assert!(matches!(notification, Some(Notification::Update(_))));
    }

    #[test]
    fn test_click_on_selection_body_seeks() {
        let mut widget = widget_with_selection();
        widget.update(SelectorEvent::Pressed {
            input: PointerInput::mouse(500.0),
            track: TRACK,
        });
        let notification = widget.update(SelectorEvent::Released {
            input: Some(PointerInput::mouse(500.0)),
            track: TRACK,
        });
        assert_eq!(notification, Some(Notification::SeekRequest(50.0)));
    }

    #[test]
    fn test_dragged_pointer_does_not_click() {
        let mut widget = widget_with_selection();
        widget.update(SelectorEvent::Pressed {
            input: PointerInput::mouse(500.0),
            track: TRACK,
        });
        widget.update(SelectorEvent::Moved {
            input: PointerInput::mouse(560.0),
            track: TRACK,
        });
        let notification = widget.update(SelectorEvent::Released {
            input: Some(PointerInput::mouse(560.0)),
            track: TRACK,
        });
        assert_eq!(notification, None);
    }

    #[test]
    fn test_cursor_left_clears_drag() {
        let mut widget = widget_with_selection();
        widget.update(SelectorEvent::Pressed {
            input: PointerInput::mouse(204.0),
            track: TRACK,
        });
        assert!(widget.engine().dragging().is_some());
        widget.update(SelectorEvent::CursorLeft);
        assert!(widget.engine().dragging().is_none());
    }

    #[test]
    fn test_external_sync_uses_cached_track() {
        let mut widget = widget_with_selection();
        let notification = widget.sync_clip_time(ClipEdge::End, 60.0);
        assert_eq!(
            notification,
            Some(Notification::Update(ClipBounds {
                start_time: 20.0,
                end_time: 60.0,
            }))
        );
    }
}
