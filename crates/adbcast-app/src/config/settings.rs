//! Settings parser for `<config_dir>/adbcast/config.toml`

use super::types::Settings;
use adbcast_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "adbcast";

/// `<config_dir>/adbcast`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Path of the settings file inside `config_dir`
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILENAME)
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `config.toml`
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(config_dir: &Path) -> Settings {
    let config_path = config_file_path(config_dir);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create a commented default `config.toml` if none exists
///
/// Returns the path of the settings file.
pub fn init_config_dir(config_dir: &Path) -> Result<PathBuf> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    let config_path = config_file_path(config_dir);
    if !config_path.exists() {
        std::fs::write(&config_path, generate_default_config())
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}

/// Create the settings file if needed and record `adb_dir` in it when given
///
/// Returns the path of the settings file.
pub fn init_settings(config_dir: &Path, adb_dir: Option<PathBuf>) -> Result<PathBuf> {
    let config_path = init_config_dir(config_dir)?;

    if adb_dir.is_some() {
        let settings = load_settings(config_dir).with_adb_dir_override(adb_dir);
        save_settings(config_dir, &settings)?;
    }

    Ok(config_path)
}

/// Save settings to `config.toml`
///
/// Uses atomic write (temp file + rename) for safety.
pub fn save_settings(config_dir: &Path, settings: &Settings) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    let config_path = config_file_path(config_dir);
    let temp_path = config_dir.join(".config.toml.tmp");

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;

    let full_content = format!("{}{}", generate_config_header(), content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, &config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

fn generate_config_header() -> String {
    "# adbcast configuration\n\
     # Empty values select the platform defaults.\n\n"
        .to_string()
}

fn generate_default_config() -> String {
    r#"# adbcast configuration
# Empty values select the platform defaults.

[bridge]
# Directory containing the adb executable (Android SDK platform-tools)
# Defaults:
#   macOS:   ~/Library/Android/sdk/platform-tools
#   Linux:   ~/Android/Sdk/platform-tools
#   Windows: %LOCALAPPDATA%\Android\Sdk\platform-tools
adb_dir = ""

[storage]
# JSON file holding the recall lists (actions, extra param keys, messages)
# Default: <data dir>/adbcast/storage.json
path = ""
"#
    .to_string()
}
