//! Device discovery using `adb devices`

use adbcast_core::prelude::*;
use serde::Serialize;

use crate::locator::BridgeLocator;
use crate::runner::CommandRunner;

/// Subcommand that lists attached devices
pub const DEVICES_SUBCOMMAND: &str = "devices";

/// A device attached to the bridge
///
/// Only the serial is used to address the device; the state column
/// (`device`, `offline`, `unauthorized`, ...) is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    /// Serial as printed in the first column
    pub id: String,

    /// Second column of the listing, if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Device {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: None,
        }
    }

    /// Get a display string for the device
    pub fn display_name(&self) -> String {
        match self.state.as_deref() {
            Some(state) if !state.is_empty() && state != "device" => {
                format!("{} ({})", self.id, state)
            }
            _ => self.id.clone(),
        }
    }
}

/// List attached devices
///
/// Runs `<adb> devices` inside the platform-tools directory. A failing
/// invocation is returned to the caller unchanged.
pub async fn discover_devices<R: CommandRunner>(
    runner: &R,
    locator: &BridgeLocator,
) -> Result<Vec<Device>> {
    let start = std::time::Instant::now();

    info!("Discovering adb devices...");

    let output = runner
        .run(
            &locator.executable(),
            &[DEVICES_SUBCOMMAND.to_string()],
            locator.directory(),
        )
        .await?;

    let devices = parse_devices_output(&output.stdout);

    info!(
        "Discovered {} devices in {:?}",
        devices.len(),
        start.elapsed()
    );

    Ok(devices)
}

/// Parse the output of `adb devices`
///
/// The first line is always a header and is skipped. Every other non-empty
/// line yields one device: the text before the first tab is the serial.
/// Discovery order is preserved and nothing is de-duplicated.
pub fn parse_devices_output(output: &str) -> Vec<Device> {
    output
        .lines()
        .skip(1)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut columns = line.splitn(2, '\t');
            let id = columns.next().unwrap_or_default().to_string();
            let state = columns
                .next()
                .map(|rest| rest.trim().to_string())
                .filter(|s| !s.is_empty());
            Device { id, state }
        })
        .collect()
}
