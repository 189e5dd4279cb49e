//! Most-recently-used lists persisted through a [`KeyValueStore`]
//!
//! Each list is a JSON array of strings stored under its own key, newest
//! first, with no duplicates. An absent key reads as an empty list; malformed
//! JSON is an error and is never silently replaced.

use std::fmt;

use adbcast_core::prelude::*;

use super::KeyValueStore;

/// Key holding the unsent new-message draft
pub const DRAFT_MESSAGE_KEY: &str = "draft_message";

/// The three independent recall lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MruList {
    Actions,
    ExtraParams,
    MessageHistory,
}

impl MruList {
    pub const ALL: [MruList; 3] = [
        MruList::Actions,
        MruList::ExtraParams,
        MruList::MessageHistory,
    ];

    /// Persistence key
    pub fn key(&self) -> &'static str {
        match self {
            MruList::Actions => "adb_actions",
            MruList::ExtraParams => "adb_extra_params",
            MruList::MessageHistory => "message_history",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            MruList::Actions => "actions",
            MruList::ExtraParams => "extra params",
            MruList::MessageHistory => "messages",
        }
    }
}

impl fmt::Display for MruList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Move `value` to the front of `list`, removing its previous occurrence
pub fn promote(list: &mut Vec<String>, value: &str) {
    if let Some(index) = list.iter().position(|item| item == value) {
        list.remove(index);
    }
    list.insert(0, value.to_string());
}

/// MRU list operations over an injected store
#[derive(Debug, Clone)]
pub struct MruStore<S> {
    store: S,
}

impl<S: KeyValueStore> MruStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current contents of `list`, newest first
    pub async fn load(&self, list: MruList) -> Result<Vec<String>> {
        match self.store.get_item(list.key()).await? {
            None => Ok(Vec::new()),
            Some(text) => {
                let values: Vec<String> = serde_json::from_str(&text)?;
                Ok(values)
            }
        }
    }

    /// Put `value` at the front of `list` and persist it
    ///
    /// Returns the list as persisted.
    pub async fn upsert(&self, list: MruList, value: &str) -> Result<Vec<String>> {
        let mut values = self.load(list).await?;
        promote(&mut values, value);

        let text = serde_json::to_string(&values)?;
        self.store.set_item(list.key(), &text).await?;

        debug!("Recorded {:?} into {}", value, list.key());
        Ok(values)
    }

    /// Remove every entry of `list`
    pub async fn clear(&self, list: MruList) -> Result<()> {
        self.store.remove_item(list.key()).await
    }

    /// Remove all three lists
    pub async fn clear_all(&self) -> Result<()> {
        for list in MruList::ALL {
            self.clear(list).await?;
        }
        info!("Cleared local storage");
        Ok(())
    }

    /// Saved new-message draft, if any
    pub async fn load_draft(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get_item(DRAFT_MESSAGE_KEY)
            .await?
            .filter(|draft| !draft.is_empty()))
    }

    /// Persist the draft; an empty draft removes the key
    pub async fn save_draft(&self, draft: &str) -> Result<()> {
        if draft.is_empty() {
            self.store.remove_item(DRAFT_MESSAGE_KEY).await
        } else {
            self.store.set_item(DRAFT_MESSAGE_KEY, draft).await
        }
    }
}
