//! Data models for Wayfarer

mod entry;

pub use entry::{decode_entries, encode_entries, DiaryEntry, EntryId, UNKNOWN_LOCATION};
