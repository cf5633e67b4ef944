//! Trimline core: the selection/drag geometry engine behind the clip
//! selector widget.
//!
//! Given a media duration, the engine lets a host pick a start and end
//! time by dragging two handles over a horizontal track, supports
//! click-to-seek inside the selection, keeps a playhead fraction in step
//! with playback, and loops playback back to the selection start. The
//! engine is headless and synchronous: pointer and attribute changes go
//! in as [`Command`]s, and the host reacts to the [`Notification`]s that
//! come out.

pub mod drag;
pub mod error;
pub mod event;
pub mod geometry;
pub mod playback;
pub mod selection;
pub mod selector;
pub mod time;

pub use drag::{DragSession, DragTarget, HitTarget};
pub use error::{SelectorError, SelectorResult};
pub use event::{ClipEdge, ClipSyncDetail, Command, Notification};
pub use geometry::{PointerInput, TrackGeometry};
pub use playback::PlaybackSync;
pub use selection::{ClipBounds, SelectionModel, HANDLE_WIDTH, UNSET_TIME};
pub use selector::ClipSelector;
pub use time::format_clip_time;
