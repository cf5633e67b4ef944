use iced::{Application, Settings, Size};
use tracing::info;

mod app;

use app::TrimlineApp;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("info,trimline=debug")
        .init();

    info!("Starting Trimline v{}", env!("CARGO_PKG_VERSION"));

    // Run the application
    TrimlineApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(960.0, 320.0),
            min_size: Some(Size::new(640.0, 240.0)),
            position: iced::window::Position::Centered,
            ..Default::default()
        },
        ..Default::default()
    })?;

    Ok(())
}
