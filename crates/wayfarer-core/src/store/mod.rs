//! Key-value persistence and the diary entry store

mod entries;
mod memory;
mod sqlite;

use std::sync::Arc;

use crate::error::Result;

pub use entries::{EntryStore, DEFAULT_ENTRIES_KEY};
pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// String key-value persistence collaborator.
///
/// `set` replaces the whole value for a key in one step; callers never see a
/// partially written value.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Read, transform and write back the value under `key` as one step.
    ///
    /// `apply` gets the current value and returns the replacement together
    /// with a result for the caller. Concurrent updates of the same key, from
    /// any handle on the same storage, wait for each other. An error from
    /// `apply` writes nothing.
    async fn update<T, F>(&self, key: &str, apply: F) -> Result<T>
    where
        F: FnOnce(Option<String>) -> Result<(String, T)>;
}

impl<T: KeyValueStore> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.as_ref().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.as_ref().set(key, value).await
    }

    async fn update<U, F>(&self, key: &str, apply: F) -> Result<U>
    where
        F: FnOnce(Option<String>) -> Result<(String, U)>,
    {
        self.as_ref().update(key, apply).await
    }
}
