use std::time::Duration;

use serde::Deserialize;
use wayfarer_core::capture::{Coordinates, GeocodedPlace};
use wayfarer_core::{Error, Result};

use crate::error::CliError;

const HTTP_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("wayfarer/", env!("CARGO_PKG_VERSION"));

/// Reverse geocoding against a Nominatim-compatible endpoint
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NominatimResponse {
    pub name: Option<String>,
    pub address: Option<NominatimAddress>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NominatimAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>) -> std::result::Result<Self, CliError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| CliError::Http(error.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub async fn reverse(&self, coordinates: Coordinates) -> Result<Vec<GeocodedPlace>> {
        let latitude = coordinates.latitude.to_string();
        let longitude = coordinates.longitude.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "jsonv2"),
                ("lat", latitude.as_str()),
                ("lon", longitude.as_str()),
                ("zoom", "18"),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|error| {
                Error::LocationUnavailable(format!("geocoder request failed: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LocationUnavailable(format!(
                "geocoder returned HTTP {}: {}",
                status.as_u16(),
                compact_body(&body)
            )));
        }

        let payload = response
            .json::<NominatimResponse>()
            .await
            .map_err(|error| {
                Error::LocationUnavailable(format!("invalid geocoder response: {error}"))
            })?;

        if let Some(message) = payload.error.as_deref() {
            tracing::debug!("Geocoder found nothing: {message}");
            return Ok(Vec::new());
        }
        Ok(vec![place_from_response(&payload)])
    }
}

/// Map a Nominatim reverse result onto a street-level name and a city
pub fn place_from_response(response: &NominatimResponse) -> GeocodedPlace {
    let address = response.address.as_ref();

    let street = address.and_then(|address| {
        let road = non_blank(address.road.as_deref())?;
        Some(match non_blank(address.house_number.as_deref()) {
            Some(number) => format!("{number} {road}"),
            None => road.to_string(),
        })
    });
    let name = street.or_else(|| non_blank(response.name.as_deref()).map(str::to_string));

    let city = address.and_then(|address| {
        [
            &address.city,
            &address.town,
            &address.village,
            &address.municipality,
        ]
        .into_iter()
        .find_map(|value| non_blank(value.as_deref()))
        .map(str::to_string)
    });

    GeocodedPlace { name, city }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn compact_body(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= 200 {
        collapsed
    } else {
        let mut truncated = collapsed.chars().take(197).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}
