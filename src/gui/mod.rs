mod app;
mod message;
mod state;
mod screens;
mod widgets;

pub use app::GestorApp;
pub use message::Message;
pub use state::AppState;

use crate::config::Settings;

/// Opens the desktop window. The workspace is loaded from `settings` when
/// the application boots.
pub fn run(settings: Settings) -> iced::Result {
    iced::application(
        move || GestorApp::new(settings.clone()),
        GestorApp::update,
        GestorApp::view,
    )
    .title(GestorApp::title)
    .run()
}
