//! Entry list screen

use crate::capture::Alerts;
use crate::error::{Error, Result};
use crate::models::{DiaryEntry, EntryId};
use crate::store::{EntryStore, KeyValueStore};

pub const EMPTY_LIST_MESSAGE: &str =
    "No memories yet. Start capturing your journey by adding your first entry!";

/// List of saved entries, reloaded from the store on every focus.
pub struct HomeScreen<'a, S, A> {
    store: &'a EntryStore<S>,
    alerts: &'a A,
    entries: Vec<DiaryEntry>,
    loading: bool,
}

impl<'a, S: KeyValueStore, A: Alerts> HomeScreen<'a, S, A> {
    pub const fn new(store: &'a EntryStore<S>, alerts: &'a A) -> Self {
        Self {
            store,
            alerts,
            entries: Vec::new(),
            loading: true,
        }
    }

    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace the in-memory list with what is stored.
    ///
    /// Whatever the screen held before is discarded; storage always wins.
    pub async fn on_focus(&mut self) -> Result<&[DiaryEntry]> {
        self.loading = true;
        let loaded = self.store.load().await;
        self.loading = false;

        match loaded {
            Ok(entries) => {
                self.entries = entries;
                Ok(&self.entries)
            }
            Err(error) => {
                tracing::error!("Failed to load entries: {error}");
                self.entries.clear();
                self.alerts
                    .alert("Load Error", "Could not load your memories.");
                Err(error)
            }
        }
    }

    /// Remove the entry shown at `index`.
    ///
    /// The row disappears immediately; the store then removes the same entry
    /// by id, so a list changed elsewhere in the meantime is not corrupted.
    pub async fn remove_entry(&mut self, index: usize) -> Result<DiaryEntry> {
        let Some(entry) = self.entries.get(index) else {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        };
        let id = entry.id;
        self.remove_entry_by_id(&id).await
    }

    pub async fn remove_entry_by_id(&mut self, id: &EntryId) -> Result<DiaryEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == *id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let removed = self.entries.remove(index);

        match self.store.remove(id).await {
            Ok(_) => Ok(removed),
            Err(Error::NotFound(_)) => {
                tracing::warn!("Entry {id} was already gone from storage");
                Ok(removed)
            }
            Err(error) => {
                tracing::error!("Failed to remove entry {id}: {error}");
                self.alerts
                    .alert("Delete Error", "Could not delete this memory.");
                // Show what is actually stored rather than the optimistic list.
                if let Ok(entries) = self.store.load().await {
                    self.entries = entries;
                }
                Err(error)
            }
        }
    }
}
