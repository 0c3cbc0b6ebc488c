use wayfarer_core::capture::{Notification, Notifier};
use wayfarer_core::{Error, Result};

const APP_NAME: &str = "Wayfarer";

/// Where saved-entry notifications go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliNotifier {
    /// Desktop notification through the platform notification service
    Desktop,
    /// Logged only; used with `--no-notify` or when disabled in config
    Log,
}

impl CliNotifier {
    pub const fn select(enabled: bool) -> Self {
        if enabled {
            Self::Desktop
        } else {
            Self::Log
        }
    }
}

impl Notifier for CliNotifier {
    async fn schedule(&self, notification: &Notification) -> Result<()> {
        match self {
            Self::Log => {
                tracing::info!("{}: {}", notification.title, notification.body);
                Ok(())
            }
            Self::Desktop => {
                let notification = notification.clone();
                tokio::task::spawn_blocking(move || show_desktop(&notification))
                    .await
                    .map_err(|error| Error::Notification(error.to_string()))?
            }
        }
    }
}

fn show_desktop(notification: &Notification) -> Result<()> {
    let mut desktop = notify_rust::Notification::new();
    desktop
        .appname(APP_NAME)
        .summary(&notification.title)
        .body(&notification.body);
    if let Some(sound) = notification.sound.as_deref() {
        desktop.sound_name(sound);
    }

    desktop
        .show()
        .map(|_| ())
        .map_err(|error| Error::Notification(error.to_string()))
}
