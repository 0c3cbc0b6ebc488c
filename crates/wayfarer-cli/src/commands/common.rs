use std::path::{Path, PathBuf};

use serde::Serialize;
use wayfarer_core::capture::Coordinates;
use wayfarer_core::config::{default_config_path, load_config_from_path, AppConfig};
use wayfarer_core::store::SqliteKeyValueStore;
use wayfarer_core::{DiaryEntry, EntryStore};

use crate::error::CliError;

const SHORT_ID_LEN: usize = 13;
const ADDRESS_PREVIEW_CHARS: usize = 40;

/// Resolved settings shared by every command
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub db_path: PathBuf,
}

impl AppContext {
    pub fn load(cli_db_path: Option<PathBuf>, cli_config_path: Option<PathBuf>) -> Self {
        let config_path = cli_config_path.unwrap_or_else(default_config_path);
        let config = load_config_from_path(&config_path);
        let db_path = config.resolve_db_path(cli_db_path);
        tracing::debug!(
            "Using config {} and database {}",
            config_path.display(),
            db_path.display()
        );
        Self {
            config,
            config_path,
            db_path,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryListItem {
    pub index: usize,
    pub id: String,
    pub image_uri: String,
    pub address: String,
    pub date: Option<String>,
    pub display_date: String,
}

pub fn open_store(ctx: &AppContext) -> Result<EntryStore<SqliteKeyValueStore>, CliError> {
    open_store_at(&ctx.db_path, ctx.config.storage_key())
}

pub fn open_store_at(
    db_path: &Path,
    key: &str,
) -> Result<EntryStore<SqliteKeyValueStore>, CliError> {
    let kv = SqliteKeyValueStore::open(db_path)?;
    Ok(EntryStore::with_key(kv, key))
}

pub fn format_entry_lines(entries: &[DiaryEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let id = entry.id.to_string();
            let short_id = id.chars().take(SHORT_ID_LEN).collect::<String>();
            let address = address_preview(&entry.address, ADDRESS_PREVIEW_CHARS);
            format!(
                "[{index}] {short_id:<13}  {address:<40}  {}",
                entry.display_date()
            )
        })
        .collect()
}

pub fn entry_to_list_item(index: usize, entry: &DiaryEntry) -> EntryListItem {
    EntryListItem {
        index,
        id: entry.id.to_string(),
        image_uri: entry.image_uri.clone(),
        address: entry.address.clone(),
        date: entry.date.map(|date| date.to_rfc3339()),
        display_date: entry.display_date(),
    }
}

pub fn address_preview(address: &str, max_chars: usize) -> String {
    let collapsed = address.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn normalize_target(target: &str) -> Result<String, CliError> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyTarget);
    }
    Ok(trimmed.to_string())
}

/// Resolve a list position or an id/prefix to a position in `entries`
pub fn resolve_entry_target(target: &str, entries: &[DiaryEntry]) -> Result<usize, CliError> {
    // Out-of-range numbers may still be an id prefix such as "2024".
    if let Ok(index) = target.parse::<usize>() {
        if index < entries.len() {
            return Ok(index);
        }
    }

    let needle = target.to_ascii_lowercase();
    if let Some(index) = entries
        .iter()
        .position(|entry| entry.id.to_string() == needle)
    {
        return Ok(index);
    }

    let matching = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.id.to_string().starts_with(&needle))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::EntryNotFound(target.to_string())),
        [index] => Ok(*index),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|index| {
                    entries[*index]
                        .id
                        .to_string()
                        .chars()
                        .take(SHORT_ID_LEN)
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousEntryId(format!(
                "ID prefix '{target}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn coordinates_from_args(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Coordinates>, CliError> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude)
            .map(Some)
            .ok_or(CliError::InvalidCoordinates {
                latitude,
                longitude,
            }),
        _ => Ok(None),
    }
}
