//! Diary entry model and its blob encoding

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Address recorded when the location could not be resolved
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Namespace for ids derived from records that were stored without one
const LEGACY_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6a1f_3c9e_52d4_4b8a_9e07_d2c4_1b85_f3a6);

/// A unique identifier for a diary entry, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Create a new unique entry ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Derive a stable ID for a record persisted before ids existed.
    ///
    /// The same position and contents always produce the same ID.
    fn legacy(index: usize, image_uri: &str, address: &str, date: Option<&DateTime<Utc>>) -> Self {
        let date = date.map(DateTime::to_rfc3339).unwrap_or_default();
        let name = format!("{index}\u{1f}{image_uri}\u{1f}{address}\u{1f}{date}");
        Self(Uuid::new_v5(&LEGACY_ID_NAMESPACE, name.as_bytes()))
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One recorded travel memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    /// Stable identifier
    pub id: EntryId,
    /// Reference to the captured image, owned by the platform's media storage
    pub image_uri: String,
    /// Human-readable location, or [`UNKNOWN_LOCATION`]
    pub address: String,
    /// Creation time; absent on records written by the minimal app revision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl DiaryEntry {
    /// Create a new entry stamped with the current time
    #[must_use]
    pub fn new(image_uri: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            image_uri: image_uri.into(),
            address: address.into(),
            date: Some(Utc::now().trunc_subsecs(3)),
        }
    }

    /// Whether the address is the fallback sentinel
    #[must_use]
    pub fn has_unknown_location(&self) -> bool {
        self.address == UNKNOWN_LOCATION
    }

    /// Long-form date for list display, e.g. "January 5, 2024"
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.map_or_else(
            || "Undated".to_string(),
            |date| date.format("%B %-d, %Y").to_string(),
        )
    }
}

/// On-disk record shape; `id` and `date` are optional for older blobs.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct StoredEntry {
    #[serde(default)]
    id: Option<EntryId>,
    image_uri: String,
    address: String,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

/// Decode a serialized entry list.
///
/// Fails with [`Error::Deserialization`] when the blob is not a JSON array of
/// entry records.
pub fn decode_entries(blob: &str) -> Result<Vec<DiaryEntry>> {
    let stored: Vec<StoredEntry> =
        serde_json::from_str(blob).map_err(|error| Error::Deserialization(error.to_string()))?;

    Ok(stored
        .into_iter()
        .enumerate()
        .map(|(index, record)| DiaryEntry {
            id: record.id.unwrap_or_else(|| {
                EntryId::legacy(
                    index,
                    &record.image_uri,
                    &record.address,
                    record.date.as_ref(),
                )
            }),
            image_uri: record.image_uri,
            address: record.address,
            date: record.date,
        })
        .collect())
}

/// Serialize the full entry list into a single blob
pub fn encode_entries(entries: &[DiaryEntry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_id_unique() {
        let id1 = EntryId::new();
        let id2 = EntryId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_entry_id_parse() {
        let id = EntryId::new();
        let parsed: EntryId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_entry_new_is_dated() {
        let entry = DiaryEntry::new("file:///a.jpg", "10 Rue X, Paris");
        assert_eq!(entry.image_uri, "file:///a.jpg");
        assert!(entry.date.is_some());
        assert!(!entry.has_unknown_location());
    }

    #[test]
    fn test_encode_uses_camel_case_keys() {
        let entry = DiaryEntry {
            id: "01890a5d-ac96-774b-bcce-b302099a8057".parse().unwrap(),
            image_uri: "a".to_string(),
            address: "Paris".to_string(),
            date: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        };
        let blob = encode_entries(&[entry]).unwrap();
        assert_eq!(
            blob,
            r#"[{"id":"01890a5d-ac96-774b-bcce-b302099a8057","imageUri":"a","address":"Paris","date":"2024-01-01T00:00:00Z"}]"#
        );
    }

    #[test]
    fn test_decode_legacy_records_without_id() {
        let blob = r#"[{"imageUri":"a","address":"Paris","date":"2024-01-01T00:00:00Z"},{"imageUri":"b","address":"Unknown location"}]"#;
        let first = decode_entries(blob).unwrap();
        let second = decode_entries(blob).unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_ne!(first[0].id, first[1].id);
        assert_eq!(first[1].date, None);
        assert!(first[1].has_unknown_location());
    }

    #[test]
    fn test_decode_rejects_schema_mismatch() {
        for blob in [
            "not json",
            r#"{"imageUri":"a"}"#,
            r#"[{"imageUri":"a"}]"#,
            r#"[{"imageUri":"a","address":"b","extra":1}]"#,
            r#"[{"imageUri":"a","address":"b","date":"yesterday"}]"#,
        ] {
            let err = decode_entries(blob).unwrap_err();
            assert!(
                matches!(err, Error::Deserialization(_)),
                "expected deserialization error for {blob}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_display_date() {
        let mut entry = DiaryEntry::new("a", "b");
        entry.date = Some(Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap());
        assert_eq!(entry.display_date(), "January 5, 2024");

        entry.date = None;
        assert_eq!(entry.display_date(), "Undated");
    }
}
