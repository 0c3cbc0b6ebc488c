//! Runtime configuration.
//!
//! Stored as JSON in the user config directory. A missing file means
//! defaults; an unreadable or malformed file is logged and also falls back to
//! defaults so the app always starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::capture::CaptureOptions;
use crate::error::Result;
use crate::store::DEFAULT_ENTRIES_KEY;
use crate::theme::ThemeMode;

const APP_DIR: &str = "wayfarer";
const CONFIG_FILE: &str = "config.json";
const DB_FILE: &str = "wayfarer.db";

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "WAYFARER_DB_PATH";

/// Default reverse geocoding endpoint (Nominatim)
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database file; `None` uses the platform data directory
    pub db_path: Option<PathBuf>,
    /// Key the entry list is stored under
    pub storage_key: String,
    pub theme: ThemeMode,
    pub capture: CaptureOptions,
    /// Whether to announce saved entries with a notification
    pub notifications_enabled: bool,
    pub geocoder_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            storage_key: DEFAULT_ENTRIES_KEY.to_string(),
            theme: ThemeMode::System,
            capture: CaptureOptions::default(),
            notifications_enabled: true,
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Database path: explicit argument, then environment, then config file,
    /// then the platform default.
    pub fn resolve_db_path(&self, cli_db_path: Option<PathBuf>) -> PathBuf {
        cli_db_path
            .or_else(|| normalize_path_option(std::env::var(DB_PATH_ENV).ok()))
            .or_else(|| self.db_path.clone())
            .unwrap_or_else(default_db_path)
    }

    /// Storage key with blank values replaced by the default
    pub fn storage_key(&self) -> &str {
        let key = self.storage_key.trim();
        if key.is_empty() {
            DEFAULT_ENTRIES_KEY
        } else {
            key
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(DB_FILE)
}

pub fn load_config() -> AppConfig {
    load_config_from_path(&default_config_path())
}

pub fn load_config_from_path(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(
                    "Failed to parse config at {}: {}",
                    path.display(),
                    error
                );
                AppConfig::default()
            }
        },
        Err(error) => {
            tracing::warn!("Failed to read config at {}: {}", path.display(), error);
            AppConfig::default()
        }
    }
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to_path(config, &default_config_path())
}

pub fn save_config_to_path(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn normalize_path_option(value: Option<String>) -> Option<PathBuf> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
