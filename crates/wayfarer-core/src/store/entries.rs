//! Diary entry store: the whole entry list as one blob under a fixed key

use super::KeyValueStore;
use crate::error::{Error, Result};
use crate::models::{decode_entries, encode_entries, DiaryEntry, EntryId};

/// Key the entry list is stored under unless configured otherwise
pub const DEFAULT_ENTRIES_KEY: &str = "entries";

/// Durable mapping from one key to the current entry list.
///
/// Every mutation rewrites the full list. Read-modify-write operations
/// (`append`, `remove`, `remove_at`) run as one backend update of the key, so
/// two appends racing from the same base list both survive, even through
/// separate stores on the same storage.
pub struct EntryStore<S> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Create a store using the default `"entries"` key
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, DEFAULT_ENTRIES_KEY)
    }

    /// Create a store reading and writing under `key`
    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying key-value collaborator
    pub const fn backend(&self) -> &S {
        &self.kv
    }

    /// Load the current entry list; an absent blob is an empty list.
    pub async fn load(&self) -> Result<Vec<DiaryEntry>> {
        let Some(blob) = self.kv.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        let entries = self.decode(&blob)?;
        tracing::debug!("Loaded {} entries", entries.len());
        Ok(entries)
    }

    /// Overwrite the stored list with `entries`. Last writer wins.
    pub async fn save(&self, entries: &[DiaryEntry]) -> Result<()> {
        let blob = encode_entries(entries)?;
        self.kv
            .set(&self.key, &blob)
            .await
            .map_err(|error| Error::StorageWrite(error.to_string()))
    }

    /// Append one entry and persist; returns the list as saved.
    pub async fn append(&self, entry: DiaryEntry) -> Result<Vec<DiaryEntry>> {
        let id = entry.id;
        let entries = self
            .mutate(|entries| {
                entries.push(entry);
                Ok(entries.clone())
            })
            .await?;

        tracing::info!("Saved entry {id} ({} total)", entries.len());
        Ok(entries)
    }

    /// Remove the entry with the given id and persist.
    pub async fn remove(&self, id: &EntryId) -> Result<DiaryEntry> {
        let removed = self
            .mutate(|entries| {
                let index = entries
                    .iter()
                    .position(|entry| entry.id == *id)
                    .ok_or_else(|| Error::NotFound(id.to_string()))?;
                Ok(entries.remove(index))
            })
            .await?;

        tracing::info!("Removed entry {id}");
        Ok(removed)
    }

    /// Remove the entry at `index` and persist.
    ///
    /// An index past the end (including any index on an empty list) fails
    /// with [`Error::IndexOutOfRange`] and writes nothing.
    pub async fn remove_at(&self, index: usize) -> Result<DiaryEntry> {
        let removed = self
            .mutate(|entries| {
                if index >= entries.len() {
                    return Err(Error::IndexOutOfRange {
                        index,
                        len: entries.len(),
                    });
                }
                Ok(entries.remove(index))
            })
            .await?;

        tracing::info!("Removed entry {} at position {index}", removed.id);
        Ok(removed)
    }

    /// Apply `change` to the stored list and write the result back in one
    /// backend update. Nothing is written when `change` fails.
    async fn mutate<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<DiaryEntry>) -> Result<T>,
    {
        self.kv
            .update(&self.key, |current| {
                let mut entries = match current {
                    Some(blob) => self.decode(&blob)?,
                    None => Vec::new(),
                };
                let output = change(&mut entries)?;
                Ok((encode_entries(&entries)?, output))
            })
            .await
            .map_err(|error| match error {
                Error::Storage(_) | Error::Database(_) => Error::StorageWrite(error.to_string()),
                other => other,
            })
    }

    fn decode(&self, blob: &str) -> Result<Vec<DiaryEntry>> {
        decode_entries(blob).inspect_err(|error| {
            tracing::warn!("Stored entry list under '{}' is unreadable: {error}", self.key);
        })
    }
}
