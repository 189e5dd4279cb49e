//! adbcast Library
//!
//! Command-line definition and headless commands for the `adbcast` binary.
//! The interactive form lives in `adbcast-tui`.

pub mod cli;
pub mod headless;

// Re-export main entry points
pub use cli::{Cli, Command, ListTarget};
pub use headless::{run_command, HeadlessEvent, HeadlessStatus};
