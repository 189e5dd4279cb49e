//! Persistent key-value storage for the recall lists
//!
//! The session only needs three string operations, so storage is abstracted
//! behind [`KeyValueStore`]. [`FileStore`] backs the real application; an
//! in-memory store is available for tests via the `test-helpers` feature.

pub mod file;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;
pub mod mru;

pub use file::FileStore;
#[cfg(any(test, feature = "test-helpers"))]
pub use memory::MemoryStore;
pub use mru::{MruList, MruStore, DRAFT_MESSAGE_KEY};

use adbcast_core::prelude::*;

/// String-keyed persistent storage
#[trait_variant::make(KeyValueStore: Send)]
pub trait LocalKeyValueStore {
    /// Value stored under `key`, `None` if absent
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    async fn remove_item(&self, key: &str) -> Result<()>;
}
