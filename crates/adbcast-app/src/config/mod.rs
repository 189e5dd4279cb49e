//! Configuration file parsing for adbcast
//!
//! Supports `<config_dir>/adbcast/config.toml` with a `[bridge]` section for
//! the adb location and a `[storage]` section for the recall-list file.

pub mod settings;
pub mod types;

pub use settings::{
    config_file_path, default_config_dir, init_config_dir, init_settings, load_settings,
    save_settings,
};
pub use types::*;
