//! Command-line interface definition

use std::path::PathBuf;

use adbcast_app::MruList;
use clap::{Parser, Subcommand, ValueEnum};

/// adbcast - Send Android broadcast intents from the terminal
#[derive(Parser, Debug)]
#[command(name = "adbcast", version)]
#[command(about = "Send Android broadcast intents to connected devices", long_about = None)]
pub struct Cli {
    /// Directory containing the adb executable (overrides config.toml)
    #[arg(long, value_name = "DIR", env = "ADBCAST_ADB_DIR", global = true)]
    pub adb_dir: Option<PathBuf>,

    /// Configuration directory (default: <config dir>/adbcast)
    #[arg(long, value_name = "DIR", env = "ADBCAST_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Pre-fill the new message field of the form
    #[arg(long, short)]
    pub message: Option<String>,

    /// Emit NDJSON events instead of text (headless commands)
    #[arg(long, global = true)]
    pub json: bool,

    /// Also print progress notices (headless commands)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List attached devices
    Devices,

    /// Send a broadcast without the interactive form
    Send {
        /// Device serial
        #[arg(long, short)]
        device: Option<String>,

        /// Message to send; defaults to the most recent history entry
        #[arg(long, short)]
        message: Option<String>,

        /// Broadcast action; defaults to the most recent one
        #[arg(long, short)]
        action: Option<String>,

        /// Extra string param key; defaults to the most recent one
        #[arg(long, short)]
        extra_param: Option<String>,
    },

    /// Remember a broadcast action
    AddAction { value: String },

    /// Remember an extra string param key
    AddExtraParam { value: String },

    /// Print a recall list, newest first
    List {
        #[arg(value_enum)]
        target: ListTarget,
    },

    /// Remove all recall lists
    Clear,

    /// Write a commented default config.toml; with --adb-dir, record that directory
    InitConfig,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Actions,
    ExtraParams,
    Messages,
}

impl From<ListTarget> for MruList {
    fn from(target: ListTarget) -> Self {
        match target {
            ListTarget::Actions => MruList::Actions,
            ListTarget::ExtraParams => MruList::ExtraParams,
            ListTarget::Messages => MruList::MessageHistory,
        }
    }
}
