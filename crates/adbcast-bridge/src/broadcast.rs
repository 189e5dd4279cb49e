//! `am broadcast` command construction and dispatch
//!
//! The message is escaped by replacing the first space with the broadcast
//! placeholder and then the first backslash with a doubled backslash. Both are
//! single replacements: any later space or backslash is left as typed.

use std::path::{Path, PathBuf};

use adbcast_core::prelude::*;

use crate::locator::BRIDGE_BINARY;
use crate::runner::{split_command_line, CommandRunner, ProcessOutput};

/// Token the device shell expands back into a space
pub const SPACE_PLACEHOLDER: &str = "%s";

/// Escape a message for the `--es` value
pub fn escape_message(message: &str) -> String {
    message
        .replacen(' ', SPACE_PLACEHOLDER, 1)
        .replacen('\\', "\\\\", 1)
}

/// A fully assembled broadcast invocation
///
/// Built fresh for every submission and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastCommand {
    pub device: String,
    pub action: String,
    pub extra_param_key: String,
    pub escaped_message: String,
    pub bridge_dir: PathBuf,
}

impl BroadcastCommand {
    /// Assemble a command, escaping `message`
    ///
    /// `action` and `extra_param_key` may be empty; they are passed through
    /// unvalidated.
    pub fn new(
        device: impl Into<String>,
        action: impl Into<String>,
        extra_param_key: impl Into<String>,
        message: &str,
        bridge_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            device: device.into(),
            action: action.into(),
            extra_param_key: extra_param_key.into(),
            escaped_message: escape_message(message),
            bridge_dir: bridge_dir.into(),
        }
    }

    /// Everything after the executable path
    pub fn args_line(&self) -> String {
        format!(
            "-s {} shell am broadcast -a \"{}\" --es {} \"{}\"",
            self.device, self.action, self.extra_param_key, self.escaped_message
        )
    }

    /// `<bridgeDir>/<binary> <args>`
    pub fn command_line(&self) -> String {
        format!(
            "{}/{} {}",
            self.bridge_dir.display(),
            BRIDGE_BINARY,
            self.args_line()
        )
    }

    /// Arguments as handed to the process, tokenized from [`Self::args_line`]
    pub fn args(&self) -> Vec<String> {
        split_command_line(&self.args_line())
    }

    pub fn executable(&self) -> PathBuf {
        self.bridge_dir.join(BRIDGE_BINARY)
    }
}

/// Build the exact broadcast command line for the given inputs
pub fn build(
    device: &str,
    action: &str,
    extra_param_key: &str,
    message: &str,
    bridge_dir: &Path,
) -> String {
    BroadcastCommand::new(device, action, extra_param_key, message, bridge_dir).command_line()
}

/// Run a broadcast command with the bridge directory as working directory
pub async fn dispatch<R: CommandRunner>(
    runner: &R,
    command: &BroadcastCommand,
) -> Result<ProcessOutput> {
    info!("{}", command.command_line());

    runner
        .run(&command.executable(), &command.args(), &command.bridge_dir)
        .await
}
