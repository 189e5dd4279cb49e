//! Headless mode - one-shot commands without the TUI
//!
//! Each command runs the same session flows as the form and reports through
//! a [`ConsoleNotifier`](adbcast_app::ConsoleNotifier). With `--json` the
//! results are written as NDJSON events, one event per line.
//!
//! # Example Output
//!
//! ```json
//! {"event":"devices","devices":[{"id":"EMU001","state":"device"}]}
//! {"event":"sent","device":"EMU001","command":"/opt/tools/adb -s EMU001 shell am broadcast ..."}
//! ```

pub mod runner;

use std::io::{self, Write};
use std::process::ExitCode;

use adbcast_bridge::Device;
use serde::Serialize;

pub use runner::run_command;

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Attached devices
    Devices { devices: Vec<Device> },

    /// Broadcast accepted by the bridge
    Sent { device: String, command: String },

    /// Contents of a recall list
    List { list: String, values: Vec<String> },

    /// A value was recorded; carries the list as persisted
    ValueAdded { list: String, values: Vec<String> },

    /// All recall lists removed
    StorageCleared,

    /// The command failed
    Error { title: String, message: String },
}

impl HeadlessEvent {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Serialize to a single JSON line
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Human-readable lines for text output
    pub fn to_text(&self) -> Vec<String> {
        match self {
            HeadlessEvent::Devices { devices } => {
                devices.iter().map(Device::display_name).collect()
            }
            HeadlessEvent::Sent { command, .. } => vec![command.clone()],
            HeadlessEvent::List { values, .. } | HeadlessEvent::ValueAdded { values, .. } => {
                values.clone()
            }
            HeadlessEvent::StorageCleared => vec!["Local storage cleared".to_string()],
            HeadlessEvent::Error { title, message } => {
                vec![format!("# {}", title), String::new(), message.clone()]
            }
        }
    }

    /// Write the event to `out` in the selected format
    pub fn emit(&self, out: &mut impl Write, json: bool) -> io::Result<()> {
        if json {
            let line = self.to_json().map_err(io::Error::other)?;
            writeln!(out, "{}", line)?;
        } else {
            for line in self.to_text() {
                writeln!(out, "{}", line)?;
            }
        }
        out.flush()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, HeadlessEvent::Error { .. })
    }
}

/// Result of a headless command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessStatus {
    Success,
    Failure,
}

impl From<HeadlessStatus> for ExitCode {
    fn from(status: HeadlessStatus) -> Self {
        match status {
            HeadlessStatus::Success => ExitCode::SUCCESS,
            HeadlessStatus::Failure => ExitCode::FAILURE,
        }
    }
}
