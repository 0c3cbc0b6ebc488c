//! Terminal implementations of the capture collaborators

mod alerts;
mod geocoder;
mod locator;
mod notifier;
mod permissions;
mod picker;

pub use alerts::TerminalAlerts;
#[cfg(test)]
pub use geocoder::{place_from_response, NominatimResponse};
pub use geocoder::NominatimGeocoder;
#[cfg(test)]
pub use locator::dms_to_degrees;
pub use locator::CliLocator;
pub use notifier::CliNotifier;
pub use permissions::TerminalPermissions;
pub use picker::FileImagePicker;
