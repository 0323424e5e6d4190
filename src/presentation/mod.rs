//! Presentation layer with UI components and event handling.

/// Terminal input mapping.
pub mod events;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::App;
