//! Entry capture: platform collaborators and the capture flow
//!
//! The platform pieces (picker, location, notifications, permissions, alerts)
//! are traits so each front-end can supply its own.

mod flow;
mod permissions;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::UNKNOWN_LOCATION;

pub use flow::{CaptureFlow, CaptureOutcome, CaptureState, Devices, EntryDraft};
pub use permissions::{
    request_permissions, Permission, PermissionGate, PermissionReport, PermissionStatus,
};

/// Where the image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    Camera,
    Gallery,
}

impl CaptureSource {
    /// Alert title shown when the picker fails
    pub const fn error_title(self) -> &'static str {
        match self {
            Self::Camera => "Camera Error",
            Self::Gallery => "Gallery Error",
        }
    }

    /// Alert body shown when the picker fails
    pub const fn error_message(self) -> &'static str {
        match self {
            Self::Camera => "There was a problem accessing the camera.",
            Self::Gallery => "There was a problem accessing your photos.",
        }
    }
}

impl fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::Gallery => write!(f, "gallery"),
        }
    }
}

/// Picker configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Compression quality in `0.0..=1.0`
    pub quality: f32,
    /// Whether the picker offers a crop/edit step
    pub allows_editing: bool,
    /// Crop aspect ratio as `(width, height)`
    pub aspect: (u32, u32),
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            quality: 0.7,
            allows_editing: true,
            aspect: (4, 3),
        }
    }
}

/// One picked image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedAsset {
    pub uri: String,
}

/// Picker result; `canceled` means the user dismissed the picker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureResult {
    pub canceled: bool,
    pub assets: Vec<CapturedAsset>,
}

impl CaptureResult {
    /// A successful pick of a single image
    pub fn picked(uri: impl Into<String>) -> Self {
        Self {
            canceled: false,
            assets: vec![CapturedAsset { uri: uri.into() }],
        }
    }

    /// The user dismissed the picker
    pub fn canceled() -> Self {
        Self {
            canceled: true,
            assets: Vec::new(),
        }
    }

    /// First picked image, unless the pick was canceled or empty
    pub fn first_uri(&self) -> Option<&str> {
        if self.canceled {
            return None;
        }
        self.assets.first().map(|asset| asset.uri.as_str())
    }
}

/// Device position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting values outside the valid ranges
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// One reverse geocoding result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocodedPlace {
    pub name: Option<String>,
    pub city: Option<String>,
}

/// A local notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub sound: Option<String>,
}

impl Notification {
    /// The notification fired after an entry is saved
    pub fn entry_saved(address: &str) -> Self {
        Self {
            title: "✨ New Memory Captured!".to_string(),
            body: format!("Location: {address}"),
            sound: Some("default".to_string()),
        }
    }
}

/// Camera / media-library picker
#[allow(async_fn_in_trait)]
pub trait ImagePicker {
    async fn launch(&self, source: CaptureSource, options: &CaptureOptions)
        -> Result<CaptureResult>;
}

/// Device location and reverse geocoding
#[allow(async_fn_in_trait)]
pub trait Locator {
    async fn current_position(&self) -> Result<Coordinates>;

    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Vec<GeocodedPlace>>;
}

/// Local notification scheduling
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn schedule(&self, notification: &Notification) -> Result<()>;
}

/// User-facing alerts
pub trait Alerts {
    fn alert(&self, title: &str, message: &str);
}

/// Turn geocoding results into a display address.
///
/// Uses the first result's `name` and `city` when both are present and
/// non-blank, otherwise [`UNKNOWN_LOCATION`]. Both parts are trimmed before
/// joining, so `" 10 Rue X"` and `"Paris "` are stored as `"10 Rue X, Paris"`;
/// a whitespace-only part counts as missing.
pub fn address_from_places(places: &[GeocodedPlace]) -> String {
    let Some(place) = places.first() else {
        return UNKNOWN_LOCATION.to_string();
    };

    let name = place.name.as_deref().map(str::trim).unwrap_or_default();
    let city = place.city.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() || city.is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        format!("{name}, {city}")
    }
}

/// Resolve the current position to an address
pub async fn resolve_address<L: Locator>(locator: &L) -> Result<String> {
    let position = locator.current_position().await?;
    tracing::debug!(
        "Resolving address for {:.5}, {:.5}",
        position.latitude,
        position.longitude
    );
    let places = locator.reverse_geocode(position).await?;
    Ok(address_from_places(&places))
}
