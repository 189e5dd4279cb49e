//! adbcast-tui - Terminal UI for adbcast
//!
//! Renders the session screens with ratatui and feeds crossterm key events
//! into the UI-independent handlers of `adbcast-app`.

pub mod app;
pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod theme;

pub use app::App;
pub use runner::run;
