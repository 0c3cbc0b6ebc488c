//! Capture form screen

use crate::capture::{
    request_permissions, Alerts, CaptureFlow, CaptureOutcome, CaptureSource, CaptureState,
    ImagePicker, Locator, Notifier, PermissionGate, PermissionReport,
};
use crate::error::Result;
use crate::models::DiaryEntry;
use crate::navigation::Navigator;
use crate::store::KeyValueStore;

const FETCHING_LOCATION_LABEL: &str = "Fetching location...";
const NO_IMAGE_LABEL: &str = "No image selected";

/// Add-entry screen wrapping one [`CaptureFlow`].
pub struct AddEntryScreen<'a, S, P, L, N, A> {
    flow: CaptureFlow<'a, S, P, L, N, A>,
    permissions: PermissionReport,
}

impl<'a, S, P, L, N, A> AddEntryScreen<'a, S, P, L, N, A>
where
    S: KeyValueStore,
    P: ImagePicker,
    L: Locator,
    N: Notifier,
    A: Alerts,
{
    /// Open the screen, asking for every permission the flow uses.
    ///
    /// Denied permissions are recorded but do not block the screen.
    pub async fn mount<G: PermissionGate>(flow: CaptureFlow<'a, S, P, L, N, A>, gate: &G) -> Self {
        let permissions = request_permissions(gate).await;
        Self { flow, permissions }
    }

    pub const fn permissions(&self) -> &PermissionReport {
        &self.permissions
    }

    pub const fn flow(&self) -> &CaptureFlow<'a, S, P, L, N, A> {
        &self.flow
    }

    pub async fn take_picture(&mut self) -> Result<CaptureOutcome> {
        self.flow.capture(CaptureSource::Camera).await
    }

    pub async fn pick_image(&mut self) -> Result<CaptureOutcome> {
        self.flow.capture(CaptureSource::Gallery).await
    }

    /// Image preview placeholder or the picked image reference
    pub fn image_label(&self) -> &str {
        match self.flow.state() {
            CaptureState::ResolvingLocation { image_uri } => image_uri.as_str(),
            CaptureState::Ready(draft) | CaptureState::Saving(draft) => draft.image_uri.as_str(),
            CaptureState::Saved(entry) => entry.image_uri.as_str(),
            CaptureState::Idle | CaptureState::AcquiringImage => NO_IMAGE_LABEL,
        }
    }

    /// Address line shown under the image
    pub fn address_label(&self) -> &str {
        self.flow
            .draft()
            .map_or(FETCHING_LOCATION_LABEL, |draft| draft.address.as_str())
    }

    /// Whether the save button is enabled
    pub const fn can_save(&self) -> bool {
        matches!(self.flow.state(), CaptureState::Ready(_))
    }

    /// Save the draft and, once stored, navigate back to the list.
    ///
    /// On failure the screen stays open with its draft.
    pub async fn save(&mut self, navigator: &mut Navigator) -> Result<DiaryEntry> {
        let entry = self.flow.save().await?;
        navigator.go_back();
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::capture::Devices;
    use crate::navigation::Route;
    use crate::store::{EntryStore, MemoryKeyValueStore};
    use crate::testing::{FakeLocator, FakePicker, GrantAll, RecordingAlerts, RecordingNotifier};

    #[tokio::test]
    async fn save_navigates_back_home() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = EntryStore::new(Arc::clone(&kv));
        let picker = FakePicker::picking("file:///a.jpg");
        let locator = FakeLocator::resolving("10 Rue X", "Paris");
        let notifier = RecordingNotifier::default();
        let alerts = RecordingAlerts::default();
        let flow = CaptureFlow::new(
            &store,
            Devices {
                picker: &picker,
                locator: &locator,
                notifier: &notifier,
                alerts: &alerts,
            },
        );

        let mut navigator = Navigator::new();
        navigator.navigate(Route::AddEntry);
        let mut screen = AddEntryScreen::mount(flow, &GrantAll).await;
        assert!(screen.permissions().all_granted());
        assert_eq!(screen.image_label(), NO_IMAGE_LABEL);
        assert_eq!(screen.address_label(), FETCHING_LOCATION_LABEL);
        assert!(!screen.can_save());

        screen.pick_image().await.unwrap();
        assert_eq!(screen.image_label(), "file:///a.jpg");
        assert_eq!(screen.address_label(), "10 Rue X, Paris");
        assert!(screen.can_save());

        screen.save(&mut navigator).await.unwrap();
        assert_eq!(navigator.current(), Route::Home);
        assert!(screen.flow().is_complete());
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_save_stays_on_screen() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = EntryStore::new(Arc::clone(&kv));
        let picker = FakePicker::picking("file:///a.jpg");
        let locator = FakeLocator::failing();
        let notifier = RecordingNotifier::default();
        let alerts = RecordingAlerts::default();
        let flow = CaptureFlow::new(
            &store,
            Devices {
                picker: &picker,
                locator: &locator,
                notifier: &notifier,
                alerts: &alerts,
            },
        );

        let mut navigator = Navigator::new();
        navigator.navigate(Route::AddEntry);
        let mut screen = AddEntryScreen::mount(flow, &GrantAll).await;
        screen.take_picture().await.unwrap();

        kv.set_fail_writes(true);
        assert!(screen.save(&mut navigator).await.is_err());
        assert_eq!(navigator.current(), Route::AddEntry);
        assert!(screen.can_save());
        assert_eq!(
            alerts.titles(),
            vec!["Location Error".to_string(), "Save Error".to_string()]
        );
    }
}
