//! JSON-file backed [`KeyValueStore`]
//!
//! The file holds a single JSON object mapping keys to their string values.
//! Every write is a read-modify-write under an exclusive lock on a sidecar
//! `.lock` file, finished with a temp-file rename.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use adbcast_core::prelude::*;

use super::KeyValueStore;

type Items = BTreeMap<String, String>;

/// Key-value store persisted to a JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Run blocking file work off the async executor
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Path, &Path) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        let lock_path = self.lock_path();
        tokio::task::spawn_blocking(move || f(&path, &lock_path))
            .await
            .map_err(|e| Error::storage(format!("storage task failed: {}", e)))?
    }
}

fn read_items(path: &Path) -> Result<Items> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Items::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()))
        }
    };

    if content.trim().is_empty() {
        return Ok(Items::new());
    }

    serde_json::from_str(&content).map_err(|e| {
        Error::storage(format!("Malformed storage file {}: {}", path.display(), e))
    })
}

fn write_items(path: &Path, items: &Items) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let content = serde_json::to_string_pretty(items)?;
    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Apply `mutate` to the stored items while holding the lock
fn modify_items<F>(path: &Path, lock_path: &Path, mutate: F) -> Result<()>
where
    F: FnOnce(&mut Items) -> bool,
{
    if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path)
        .with_context(|| format!("Failed to open {}", lock_path.display()))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| Error::storage(format!("Failed to lock {}: {}", lock_path.display(), e)))?;

    let result = read_items(path).and_then(|mut items| {
        if mutate(&mut items) {
            write_items(path, &items)
        } else {
            Ok(())
        }
    });

    if let Err(e) = FileExt::unlock(&lock_file) {
        warn!("Failed to unlock {}: {}", lock_path.display(), e);
    }

    result
}

impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |path, _| Ok(read_items(path)?.remove(&key)))
            .await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.blocking(move |path, lock_path| {
            modify_items(path, lock_path, |items| {
                items.insert(key, value);
                true
            })
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |path, lock_path| {
            modify_items(path, lock_path, |items| items.remove(&key).is_some())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path().join("storage.json"));

        let value = KeyValueStore::get_item(&store, "adb_actions").await.unwrap();

        assert_eq!(value, None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path().join("storage.json"));

        KeyValueStore::set_item(&store, "adb_actions", r#"["A"]"#)
            .await
            .unwrap();

        let value = KeyValueStore::get_item(&store, "adb_actions").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"["A"]"#));
    }

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("storage.json");

        KeyValueStore::set_item(&FileStore::new(&path), "k", "v")
            .await
            .unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            KeyValueStore::get_item(&reopened, "k").await.unwrap(),
            Some("v".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_keeps_other_keys() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path().join("storage.json"));
        KeyValueStore::set_item(&store, "a", "1").await.unwrap();
        KeyValueStore::set_item(&store, "b", "2").await.unwrap();

        KeyValueStore::remove_item(&store, "a").await.unwrap();

        assert_eq!(KeyValueStore::get_item(&store, "a").await.unwrap(), None);
        assert_eq!(
            KeyValueStore::get_item(&store, "b").await.unwrap(),
            Some("2".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_ok() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path().join("storage.json"));

        KeyValueStore::remove_item(&store, "missing").await.unwrap();

        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(&path);

        let err = KeyValueStore::get_item(&store, "k").await.unwrap_err();

        assert!(matches!(err, Error::Storage { .. }));
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("storage.json");
        let store = FileStore::new(&path);

        KeyValueStore::set_item(&store, "k", "v").await.unwrap();

        assert!(path.exists());
        assert!(!temp.path().join("storage.json.tmp").exists());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_unreadable_path_keeps_io_error() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path());

        let err = KeyValueStore::get_item(&store, "k").await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_write_under_a_file_fails() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = FileStore::new(blocker.join("storage.json"));

        let err = KeyValueStore::set_item(&store, "k", "v").await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }
}
