//! In-process collaborator doubles shared by unit tests.

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::capture::{
    Alerts, CaptureOptions, CaptureResult, CaptureSource, Coordinates, GeocodedPlace,
    ImagePicker, Locator, Notification, Notifier, Permission, PermissionGate, PermissionStatus,
};
use crate::error::{Error, Result};

pub enum PickerBehavior {
    Pick(String),
    Cancel,
    Fail,
}

pub struct FakePicker {
    behavior: Mutex<PickerBehavior>,
    launches: Mutex<Vec<(CaptureSource, CaptureOptions)>>,
}

impl FakePicker {
    pub fn new(behavior: PickerBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            launches: Mutex::new(Vec::new()),
        }
    }

    pub fn picking(uri: &str) -> Self {
        Self::new(PickerBehavior::Pick(uri.to_string()))
    }

    pub fn set(&self, behavior: PickerBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    /// Every launch so far, with the options it was given
    pub fn launches(&self) -> Vec<(CaptureSource, CaptureOptions)> {
        self.launches.lock().unwrap().clone()
    }
}

impl ImagePicker for FakePicker {
    async fn launch(
        &self,
        source: CaptureSource,
        options: &CaptureOptions,
    ) -> Result<CaptureResult> {
        self.launches.lock().unwrap().push((source, *options));
        match &*self.behavior.lock().unwrap() {
            PickerBehavior::Pick(uri) => Ok(CaptureResult::picked(uri.clone())),
            PickerBehavior::Cancel => Ok(CaptureResult::canceled()),
            PickerBehavior::Fail => Err(Error::Capture("picker crashed".to_string())),
        }
    }
}

/// Locator with a fixed answer; `None` parts fail.
pub struct FakeLocator {
    pub position: Option<Coordinates>,
    pub places: Option<Vec<GeocodedPlace>>,
}

impl FakeLocator {
    pub fn resolving(name: &str, city: &str) -> Self {
        Self {
            position: Coordinates::new(48.8566, 2.3522),
            places: Some(vec![GeocodedPlace {
                name: Some(name.to_string()),
                city: Some(city.to_string()),
            }]),
        }
    }

    pub fn failing() -> Self {
        Self {
            position: Coordinates::new(48.8566, 2.3522),
            places: None,
        }
    }
}

impl Locator for FakeLocator {
    async fn current_position(&self) -> Result<Coordinates> {
        self.position
            .ok_or_else(|| Error::LocationUnavailable("no fix".to_string()))
    }

    async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<Vec<GeocodedPlace>> {
        self.places
            .clone()
            .ok_or_else(|| Error::LocationUnavailable("geocoder down".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
    pub fail: bool,
}

impl Notifier for RecordingNotifier {
    async fn schedule(&self, notification: &Notification) -> Result<()> {
        if self.fail {
            return Err(Error::InvalidState("notifications unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub shown: Mutex<Vec<(String, String)>>,
}

impl RecordingAlerts {
    pub fn titles(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|(title, _)| title.clone())
            .collect()
    }
}

impl Alerts for RecordingAlerts {
    fn alert(&self, title: &str, message: &str) {
        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

pub struct GrantAll;

impl PermissionGate for GrantAll {
    async fn request(&self, _permission: Permission) -> PermissionStatus {
        PermissionStatus::Granted
    }
}

/// In-memory sink for formatted log output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
