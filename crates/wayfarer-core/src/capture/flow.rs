//! Capture flow: image -> address -> confirmed save

use super::{
    resolve_address, Alerts, CaptureOptions, CaptureSource, ImagePicker, Locator, Notification,
    Notifier,
};
use crate::error::{Error, Result};
use crate::models::{DiaryEntry, UNKNOWN_LOCATION};
use crate::store::{EntryStore, KeyValueStore};

const LOCATION_ERROR_TITLE: &str = "Location Error";
const LOCATION_ERROR_MESSAGE: &str = "Could not determine your current location.";
const SAVE_ERROR_TITLE: &str = "Save Error";
const SAVE_ERROR_MESSAGE: &str = "Could not save your memory. Please try again.";

/// Image and address waiting for the user to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub image_uri: String,
    pub address: String,
}

/// Where a capture flow currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    AcquiringImage,
    ResolvingLocation { image_uri: String },
    Ready(EntryDraft),
    Saving(EntryDraft),
    Saved(DiaryEntry),
}

impl CaptureState {
    const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AcquiringImage => "acquiring image",
            Self::ResolvingLocation { .. } => "resolving location",
            Self::Ready(_) => "ready",
            Self::Saving(_) => "saving",
            Self::Saved(_) => "saved",
        }
    }
}

/// Result of one capture gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The picker was dismissed; nothing changed
    Canceled,
    /// A draft is ready to save
    Ready {
        draft: EntryDraft,
        /// `false` when the address fell back to the unknown-location label
        /// because position or geocoding failed
        location_resolved: bool,
    },
}

/// Platform collaborators used by a capture flow
pub struct Devices<'a, P, L, N, A> {
    pub picker: &'a P,
    pub locator: &'a L,
    pub notifier: &'a N,
    pub alerts: &'a A,
}

/// Turns a capture gesture into a saved [`DiaryEntry`].
///
/// Image acquisition always completes before location resolution, which
/// completes before the save. Only the picker step can be canceled.
pub struct CaptureFlow<'a, S, P, L, N, A> {
    store: &'a EntryStore<S>,
    devices: Devices<'a, P, L, N, A>,
    options: CaptureOptions,
    state: CaptureState,
}

impl<'a, S, P, L, N, A> CaptureFlow<'a, S, P, L, N, A>
where
    S: KeyValueStore,
    P: ImagePicker,
    L: Locator,
    N: Notifier,
    A: Alerts,
{
    pub fn new(store: &'a EntryStore<S>, devices: Devices<'a, P, L, N, A>) -> Self {
        Self {
            store,
            devices,
            options: CaptureOptions::default(),
            state: CaptureState::Idle,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CaptureOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn state(&self) -> &CaptureState {
        &self.state
    }

    /// The pending draft, if any
    pub const fn draft(&self) -> Option<&EntryDraft> {
        match &self.state {
            CaptureState::Ready(draft) | CaptureState::Saving(draft) => Some(draft),
            _ => None,
        }
    }

    /// Whether a collaborator call is in flight; gates the save button
    pub const fn is_busy(&self) -> bool {
        matches!(
            self.state,
            CaptureState::AcquiringImage
                | CaptureState::ResolvingLocation { .. }
                | CaptureState::Saving(_)
        )
    }

    /// Whether the entry was saved and the screen should close
    pub const fn is_complete(&self) -> bool {
        matches!(self.state, CaptureState::Saved(_))
    }

    /// Drop any draft and start over
    pub fn reset(&mut self) {
        self.transition(CaptureState::Idle);
    }

    /// Acquire an image from `source` and resolve where it was taken.
    ///
    /// A canceled pick restores the previous state. A location failure never
    /// blocks: the draft gets [`UNKNOWN_LOCATION`] and the user is warned.
    pub async fn capture(&mut self, source: CaptureSource) -> Result<CaptureOutcome> {
        if self.is_busy() {
            return Err(Error::InvalidState(format!(
                "cannot capture while {}",
                self.state.name()
            )));
        }

        let previous = match std::mem::replace(&mut self.state, CaptureState::AcquiringImage) {
            CaptureState::Saved(_) => CaptureState::Idle,
            other => other,
        };
        tracing::debug!("Capture flow: acquiring image from {source}");

        let picked = match self.devices.picker.launch(source, &self.options).await {
            Ok(picked) => picked,
            Err(error) => {
                tracing::error!("Image picker ({source}) failed: {error}");
                self.devices
                    .alerts
                    .alert(source.error_title(), source.error_message());
                self.transition(previous);
                return Err(match error {
                    Error::PermissionDenied(_) | Error::Capture(_) => error,
                    other => Error::Capture(other.to_string()),
                });
            }
        };

        let Some(image_uri) = picked.first_uri().map(str::to_string) else {
            tracing::debug!("Capture flow: {source} pick canceled");
            self.transition(previous);
            return Ok(CaptureOutcome::Canceled);
        };

        self.transition(CaptureState::ResolvingLocation {
            image_uri: image_uri.clone(),
        });

        let (address, location_resolved) = match resolve_address(self.devices.locator).await {
            Ok(address) => (address, true),
            Err(error) => {
                tracing::warn!("Failed to get location: {error}");
                self.devices
                    .alerts
                    .alert(LOCATION_ERROR_TITLE, LOCATION_ERROR_MESSAGE);
                (UNKNOWN_LOCATION.to_string(), false)
            }
        };

        let draft = EntryDraft { image_uri, address };
        self.transition(CaptureState::Ready(draft.clone()));
        Ok(CaptureOutcome::Ready {
            draft,
            location_resolved,
        })
    }

    /// Persist the pending draft and announce it.
    ///
    /// On a storage failure the draft is kept so the user can press save
    /// again. A notification failure is logged and does not undo the save.
    pub async fn save(&mut self) -> Result<DiaryEntry> {
        let draft = match &self.state {
            CaptureState::Ready(draft) => draft.clone(),
            other => {
                return Err(Error::InvalidState(format!(
                    "cannot save while {}",
                    other.name()
                )));
            }
        };

        self.transition(CaptureState::Saving(draft.clone()));
        let entry = DiaryEntry::new(draft.image_uri.clone(), draft.address.clone());

        if let Err(error) = self.store.append(entry.clone()).await {
            tracing::error!("Failed to save entry: {error}");
            self.devices.alerts.alert(SAVE_ERROR_TITLE, SAVE_ERROR_MESSAGE);
            self.transition(CaptureState::Ready(draft));
            return Err(error);
        }

        let notification = Notification::entry_saved(&entry.address);
        if let Err(error) = self.devices.notifier.schedule(&notification).await {
            tracing::warn!("Failed to schedule saved-entry notification: {error}");
        }

        self.transition(CaptureState::Saved(entry.clone()));
        Ok(entry)
    }

    fn transition(&mut self, next: CaptureState) {
        tracing::debug!("Capture flow: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryKeyValueStore;
    use crate::testing::{
        FakeLocator, FakePicker, LogBuffer, PickerBehavior, RecordingAlerts, RecordingNotifier,
    };
    use pretty_assertions::assert_eq;

    struct Rig {
        kv: Arc<MemoryKeyValueStore>,
        store: EntryStore<Arc<MemoryKeyValueStore>>,
        picker: FakePicker,
        locator: FakeLocator,
        notifier: RecordingNotifier,
        alerts: RecordingAlerts,
    }

    impl Rig {
        fn new(picker: FakePicker, locator: FakeLocator) -> Self {
            let kv = Arc::new(MemoryKeyValueStore::new());
            Self {
                store: EntryStore::new(Arc::clone(&kv)),
                kv,
                picker,
                locator,
                notifier: RecordingNotifier::default(),
                alerts: RecordingAlerts::default(),
            }
        }

        fn flow(
            &self,
        ) -> CaptureFlow<
            '_,
            Arc<MemoryKeyValueStore>,
            FakePicker,
            FakeLocator,
            RecordingNotifier,
            RecordingAlerts,
        > {
            CaptureFlow::new(
                &self.store,
                Devices {
                    picker: &self.picker,
                    locator: &self.locator,
                    notifier: &self.notifier,
                    alerts: &self.alerts,
                },
            )
        }
    }

    #[tokio::test]
    async fn capture_and_save_appends_geocoded_entry() {
        let rig = Rig::new(
            FakePicker::picking("file:///eiffel.jpg"),
            FakeLocator::resolving("10 Rue X", "Paris"),
        );
        let mut flow = rig.flow();

        let outcome = flow.capture(CaptureSource::Camera).await.unwrap();
        assert_eq!(
            outcome,
            CaptureOutcome::Ready {
                draft: EntryDraft {
                    image_uri: "file:///eiffel.jpg".to_string(),
                    address: "10 Rue X, Paris".to_string(),
                },
                location_resolved: true,
            }
        );

        let before = rig.store.load().await.unwrap().len();
        let saved = flow.save().await.unwrap();
        let after = rig.store.load().await.unwrap();

        assert_eq!(after.len(), before + 1);
        assert_eq!(after.last(), Some(&saved));
        assert_eq!(saved.address, "10 Rue X, Paris");
        assert!(saved.date.is_some());
        assert!(flow.is_complete());

        let sent = rig.notifier.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), &[Notification::entry_saved("10 Rue X, Paris")]);
        assert!(rig.alerts.titles().is_empty());
    }

    #[tokio::test]
    async fn geocode_failure_saves_unknown_location_and_warns() {
        let rig = Rig::new(FakePicker::picking("file:///a.jpg"), FakeLocator::failing());
        let mut flow = rig.flow();

        let outcome = flow.capture(CaptureSource::Gallery).await.unwrap();
        assert!(matches!(
            outcome,
            CaptureOutcome::Ready {
                location_resolved: false,
                ..
            }
        ));
        assert_eq!(rig.alerts.titles(), vec![LOCATION_ERROR_TITLE.to_string()]);

        let saved = flow.save().await.unwrap();
        assert_eq!(saved.address, UNKNOWN_LOCATION);
        assert!(flow.is_complete());
        assert_eq!(rig.store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_position_also_falls_back() {
        let locator = FakeLocator {
            position: None,
            places: Some(Vec::new()),
        };
        let rig = Rig::new(FakePicker::picking("file:///a.jpg"), locator);
        let mut flow = rig.flow();

        flow.capture(CaptureSource::Camera).await.unwrap();
        assert_eq!(flow.draft().unwrap().address, UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn cancel_returns_to_idle_without_side_effects() {
        let rig = Rig::new(
            FakePicker::new(PickerBehavior::Cancel),
            FakeLocator::resolving("A", "B"),
        );
        let mut flow = rig.flow();

        let outcome = flow.capture(CaptureSource::Camera).await.unwrap();
        assert_eq!(outcome, CaptureOutcome::Canceled);
        assert_eq!(flow.state(), &CaptureState::Idle);
        assert_eq!(rig.kv.get("entries").await.unwrap(), None);
        assert!(rig.alerts.titles().is_empty());
    }

    #[tokio::test]
    async fn cancel_keeps_existing_draft() {
        let rig = Rig::new(
            FakePicker::picking("file:///first.jpg"),
            FakeLocator::resolving("A", "B"),
        );
        let mut flow = rig.flow();
        flow.capture(CaptureSource::Camera).await.unwrap();

        rig.picker.set(PickerBehavior::Cancel);
        flow.capture(CaptureSource::Gallery).await.unwrap();

        assert_eq!(flow.draft().unwrap().image_uri, "file:///first.jpg");
    }

    #[tokio::test]
    async fn picker_failure_alerts_and_returns_capture_error() {
        let rig = Rig::new(
            FakePicker::new(PickerBehavior::Fail),
            FakeLocator::resolving("A", "B"),
        );
        let mut flow = rig.flow();

        let err = flow.capture(CaptureSource::Gallery).await.unwrap_err();
        assert!(matches!(err, Error::Capture(_)));
        assert_eq!(flow.state(), &CaptureState::Idle);
        assert_eq!(rig.alerts.titles(), vec!["Gallery Error".to_string()]);
    }

    #[tokio::test]
    async fn picker_launches_with_default_options_and_requested_source() {
        let rig = Rig::new(
            FakePicker::picking("file:///a.jpg"),
            FakeLocator::resolving("A", "B"),
        );
        let mut flow = rig.flow();

        flow.capture(CaptureSource::Camera).await.unwrap();
        flow.capture(CaptureSource::Gallery).await.unwrap();

        let expected = CaptureOptions {
            quality: 0.7,
            allows_editing: true,
            aspect: (4, 3),
        };
        assert_eq!(
            rig.picker.launches(),
            vec![
                (CaptureSource::Camera, expected),
                (CaptureSource::Gallery, expected),
            ]
        );
    }

    #[tokio::test]
    async fn configured_options_reach_the_picker() {
        let rig = Rig::new(
            FakePicker::picking("file:///a.jpg"),
            FakeLocator::resolving("A", "B"),
        );
        let options = CaptureOptions {
            quality: 0.3,
            allows_editing: false,
            aspect: (1, 1),
        };
        let mut flow = rig.flow().with_options(options);

        flow.capture(CaptureSource::Gallery).await.unwrap();

        assert_eq!(rig.picker.launches(), vec![(CaptureSource::Gallery, options)]);
    }

    #[tokio::test]
    async fn save_traces_ready_to_saving() {
        let rig = Rig::new(
            FakePicker::picking("file:///a.jpg"),
            FakeLocator::resolving("A", "B"),
        );
        let log = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(log.clone())
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        let mut flow = rig.flow();
        flow.capture(CaptureSource::Camera).await.unwrap();
        flow.save().await.unwrap();

        let output = log.contents();
        assert!(output.contains("ready -> saving"), "{output}");
        assert!(output.contains("saving -> saved"), "{output}");
        assert!(!output.contains("idle -> saving"), "{output}");
    }

    #[tokio::test]
    async fn save_without_draft_is_invalid() {
        let rig = Rig::new(FakePicker::picking("a"), FakeLocator::resolving("A", "B"));
        let mut flow = rig.flow();

        let err = flow.save().await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert_eq!(flow.state(), &CaptureState::Idle);
    }

    #[tokio::test]
    async fn storage_failure_keeps_draft_for_retry() {
        let rig = Rig::new(FakePicker::picking("file:///a.jpg"), FakeLocator::resolving("A", "B"));
        let mut flow = rig.flow();
        flow.capture(CaptureSource::Camera).await.unwrap();

        rig.kv.set_fail_writes(true);
        let err = flow.save().await.unwrap_err();
        assert!(matches!(err, Error::StorageWrite(_)));
        assert!(matches!(flow.state(), CaptureState::Ready(_)));
        assert_eq!(rig.alerts.titles(), vec![SAVE_ERROR_TITLE.to_string()]);
        assert!(rig.notifier.sent.lock().unwrap().is_empty());
        assert!(rig.store.load().await.unwrap().is_empty());

        rig.kv.set_fail_writes(false);
        flow.save().await.unwrap();
        assert_eq!(rig.store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn notification_failure_does_not_undo_save() {
        let mut rig = Rig::new(
            FakePicker::picking("file:///a.jpg"),
            FakeLocator::resolving("A", "B"),
        );
        rig.notifier.fail = true;
        let mut flow = rig.flow();

        flow.capture(CaptureSource::Camera).await.unwrap();
        flow.save().await.unwrap();

        assert!(flow.is_complete());
        assert_eq!(rig.store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn two_flows_saving_concurrently_keep_both_entries() {
        let rig = Rig::new(FakePicker::picking("file:///a.jpg"), FakeLocator::resolving("A", "B"));
        rig.store
            .save(&[DiaryEntry::new("file:///base.jpg", "Base")])
            .await
            .unwrap();

        let mut first = rig.flow();
        let mut second = rig.flow();
        first.capture(CaptureSource::Camera).await.unwrap();
        second.capture(CaptureSource::Gallery).await.unwrap();

        let (a, b) = tokio::join!(first.save(), second.save());
        a.unwrap();
        b.unwrap();

        assert_eq!(rig.store.load().await.unwrap().len(), 3);
    }
}
