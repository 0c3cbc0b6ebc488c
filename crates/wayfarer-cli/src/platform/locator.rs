use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use wayfarer_core::capture::{Coordinates, GeocodedPlace, Locator};
use wayfarer_core::{Error, Result};

use super::geocoder::NominatimGeocoder;

/// Position from explicit coordinates or the image's GPS tags.
///
/// Without a geocoder (offline) reverse geocoding always fails, which the
/// capture flow records as an unknown location.
#[derive(Debug, Clone, Default)]
pub struct CliLocator {
    explicit: Option<Coordinates>,
    image: Option<PathBuf>,
    geocoder: Option<NominatimGeocoder>,
}

impl CliLocator {
    pub const fn new(
        explicit: Option<Coordinates>,
        image: Option<PathBuf>,
        geocoder: Option<NominatimGeocoder>,
    ) -> Self {
        Self {
            explicit,
            image,
            geocoder,
        }
    }
}

impl Locator for CliLocator {
    async fn current_position(&self) -> Result<Coordinates> {
        if let Some(coordinates) = self.explicit {
            return Ok(coordinates);
        }

        let Some(image) = self.image.as_deref() else {
            return Err(Error::LocationUnavailable(
                "no coordinates given".to_string(),
            ));
        };

        match read_gps(image) {
            Ok(Some(coordinates)) => Ok(coordinates),
            Ok(None) => Err(Error::LocationUnavailable(format!(
                "{} has no GPS tags; pass --lat and --lon",
                image.display()
            ))),
            Err(error) => {
                tracing::debug!("Failed to read EXIF from {}: {error}", image.display());
                Err(Error::LocationUnavailable(format!(
                    "{} has no readable EXIF data",
                    image.display()
                )))
            }
        }
    }

    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Vec<GeocodedPlace>> {
        match &self.geocoder {
            Some(geocoder) => geocoder.reverse(coordinates).await,
            None => Err(Error::LocationUnavailable(
                "reverse geocoding is disabled (--offline)".to_string(),
            )),
        }
    }
}

/// Convert degrees/minutes/seconds plus an N/S/E/W reference to signed degrees
pub fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64, reference: &str) -> f64 {
    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    match reference.trim() {
        "S" | "s" | "W" | "w" => -value,
        _ => value,
    }
}

fn read_gps(path: &Path) -> std::result::Result<Option<Coordinates>, exif::Error> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader)?;

    let latitude = gps_component(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef);
    let longitude = gps_component(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef);

    Ok(match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude),
        _ => None,
    })
}

fn gps_component(exif: &exif::Exif, value_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let Value::Rational(parts) = &field.value else {
        return None;
    };
    let [degrees, minutes, seconds] = parts.as_slice() else {
        return None;
    };

    let reference = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|field| match &field.value {
            Value::Ascii(values) => values
                .first()
                .and_then(|bytes| std::str::from_utf8(bytes).ok())
                .map(str::to_string),
            _ => None,
        })
        .unwrap_or_default();

    Some(dms_to_degrees(
        degrees.to_f64(),
        minutes.to_f64(),
        seconds.to_f64(),
        &reference,
    ))
}
