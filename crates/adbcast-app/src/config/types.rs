//! Configuration types for adbcast
//!
//! Defines:
//! - `Settings` - Global application settings (`config.toml`)
//! - Related sub-sections

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings (`<config_dir>/adbcast/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub bridge: BridgeSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

/// Where to find `adb`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BridgeSettings {
    /// platform-tools directory; empty or absent selects the platform default
    #[serde(default)]
    pub adb_dir: Option<PathBuf>,
}

/// Where the recall lists are persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Storage file; empty or absent selects `<data_local_dir>/adbcast/storage.json`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Apply a command-line override for the platform-tools directory
    pub fn with_adb_dir_override(mut self, adb_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = adb_dir {
            self.bridge.adb_dir = Some(dir);
        }
        self
    }

    /// Configured platform-tools directory, if any
    pub fn adb_dir(&self) -> Option<&Path> {
        non_empty(self.bridge.adb_dir.as_deref())
    }

    /// Resolved storage file path
    pub fn storage_path(&self) -> PathBuf {
        non_empty(self.storage.path.as_deref())
            .map(Path::to_path_buf)
            .unwrap_or_else(default_storage_path)
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// `<data_local_dir>/adbcast/storage.json`
pub fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("adbcast")
        .join("storage.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_overrides() {
        let settings = Settings::default();
        assert!(settings.adb_dir().is_none());
        assert_eq!(settings.storage_path(), default_storage_path());
    }

    #[test]
    fn test_empty_strings_count_as_unset() {
        let settings: Settings = toml::from_str(
            r#"
[bridge]
adb_dir = ""

[storage]
path = ""
"#,
        )
        .unwrap();
        assert!(settings.adb_dir().is_none());
        assert_eq!(settings.storage_path(), default_storage_path());
    }

    #[test]
    fn test_cli_override_replaces_file_value() {
        let mut settings = Settings::default();
        settings.bridge.adb_dir = Some(PathBuf::from("/from/file"));

        let settings = settings.with_adb_dir_override(Some(PathBuf::from("/from/cli")));
        assert_eq!(settings.adb_dir(), Some(Path::new("/from/cli")));
    }

    #[test]
    fn test_missing_override_keeps_file_value() {
        let mut settings = Settings::default();
        settings.bridge.adb_dir = Some(PathBuf::from("/from/file"));

        let settings = settings.with_adb_dir_override(None);
        assert_eq!(settings.adb_dir(), Some(Path::new("/from/file")));
    }

    #[test]
    fn test_custom_storage_path() {
        let mut settings = Settings::default();
        settings.storage.path = Some(PathBuf::from("/tmp/adbcast.json"));
        assert_eq!(settings.storage_path(), PathBuf::from("/tmp/adbcast.json"));
    }
}
