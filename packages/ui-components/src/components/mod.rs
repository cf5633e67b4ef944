pub mod clip_selector;
pub mod preview_button;
pub mod sync_button;

pub use clip_selector::*;
pub use preview_button::*;
pub use sync_button::*;
