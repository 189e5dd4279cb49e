//! # adbcast-bridge - adb Process Management
//!
//! Locates the `adb` executable, enumerates attached devices and builds and
//! dispatches `am broadcast` commands.
//!
//! Depends on [`adbcast_core`] for error handling.
//!
//! ## Public API
//!
//! ### Location
//! - [`BridgeLocator`] - Resolve the platform-tools directory and check for `adb`
//!
//! ### Process Invocation
//! - [`CommandRunner`] - Injected capability for running a child process
//! - [`TokioCommandRunner`] - Production runner on `tokio::process`
//! - [`split_command_line()`] - Tokenize a command string into arguments
//!
//! ### Device Discovery
//! - [`Device`] - Attached device as listed by `adb devices`
//! - [`discover_devices()`] - Run `adb devices` and parse the output
//!
//! ### Broadcast
//! - [`BroadcastCommand`] - Escaped, assembled `am broadcast` invocation
//! - [`dispatch()`] - Run a broadcast command through a runner

pub mod broadcast;
pub mod devices;
pub mod locator;
pub mod runner;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use broadcast::{build, dispatch, escape_message, BroadcastCommand, SPACE_PLACEHOLDER};
pub use devices::{discover_devices, parse_devices_output, Device, DEVICES_SUBCOMMAND};
pub use locator::{BridgeLocator, BRIDGE_BINARY};
pub use runner::{split_command_line, CommandRunner, ProcessOutput, TokioCommandRunner};
