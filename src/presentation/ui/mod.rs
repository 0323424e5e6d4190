//! UI screens.

mod app;
mod visibility;

pub use app::{App, image_urls};
pub use visibility::TerminalVisibility;
