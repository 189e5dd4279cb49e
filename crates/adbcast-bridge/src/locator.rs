//! Location of the `adb` executable
//!
//! The platform-tools directory comes from configuration when set, otherwise
//! from a per-platform default under the user's home directory.

use std::path::{Path, PathBuf};

use adbcast_core::prelude::*;

/// File name of the bridge executable inside the platform-tools directory
#[cfg(not(windows))]
pub const BRIDGE_BINARY: &str = "adb";

/// File name of the bridge executable inside the platform-tools directory
#[cfg(windows)]
pub const BRIDGE_BINARY: &str = "adb.exe";

/// Resolved platform-tools directory, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeLocator {
    directory: PathBuf,
}

impl BridgeLocator {
    /// Use an explicit platform-tools directory
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Resolve from an optional configured override
    pub fn resolve(configured: Option<&Path>) -> Self {
        Self::new(Self::resolve_directory(configured))
    }

    /// Configured directory if present and non-empty, otherwise the default
    pub fn resolve_directory(configured: Option<&Path>) -> PathBuf {
        match configured {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => Self::default_directory(),
        }
    }

    /// Default platform-tools location as installed by Android Studio
    pub fn default_directory() -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            home_dir().join("Library/Android/sdk/platform-tools")
        }

        #[cfg(windows)]
        {
            dirs::data_local_dir()
                .unwrap_or_else(home_dir)
                .join("Android")
                .join("Sdk")
                .join("platform-tools")
        }

        #[cfg(not(any(target_os = "macos", windows)))]
        {
            home_dir().join("Android/Sdk/platform-tools")
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `<directory>/<binary>`
    pub fn executable(&self) -> PathBuf {
        self.directory.join(BRIDGE_BINARY)
    }

    /// Whether the executable exists on disk
    pub fn exists(&self) -> bool {
        let path = self.executable();
        let exists = path.exists();
        info!(
            "adb exists: {}, path: {}, dir: {}",
            exists,
            path.display(),
            self.directory.display()
        );
        exists
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_configured_directory_wins() {
        let dir = BridgeLocator::resolve_directory(Some(Path::new("/opt/tools")));
        assert_eq!(dir, PathBuf::from("/opt/tools"));
    }

    #[test]
    fn test_empty_configured_directory_falls_back() {
        let dir = BridgeLocator::resolve_directory(Some(Path::new("")));
        assert_eq!(dir, BridgeLocator::default_directory());
    }

    #[test]
    #[serial]
    #[cfg(target_os = "linux")]
    fn test_default_directory_uses_home() {
        let original = std::env::var_os("HOME");
        std::env::set_var("HOME", "/home/tester");

        let dir = BridgeLocator::default_directory();

        match original {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }
        assert_eq!(dir, PathBuf::from("/home/tester/Android/Sdk/platform-tools"));
    }

    #[test]
    fn test_executable_is_directory_plus_binary() {
        let locator = BridgeLocator::new("/opt/tools");
        assert_eq!(locator.executable(), Path::new("/opt/tools").join(BRIDGE_BINARY));
        assert_eq!(locator.directory(), Path::new("/opt/tools"));
    }

    #[test]
    fn test_exists_false_when_missing() {
        let temp = tempdir().unwrap();
        let locator = BridgeLocator::new(temp.path());
        assert!(!locator.exists());
    }

    #[test]
    fn test_exists_true_when_binary_present() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(BRIDGE_BINARY), b"").unwrap();
        let locator = BridgeLocator::new(temp.path());
        assert!(locator.exists());
    }

    #[test]
    fn test_exists_false_for_nonexistent_directory() {
        let locator = BridgeLocator::new("/definitely/not/a/real/platform-tools");
        assert!(!locator.exists());
    }
}
