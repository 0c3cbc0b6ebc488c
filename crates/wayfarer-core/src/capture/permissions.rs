//! Platform permission requests

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capabilities the capture screen needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Camera,
    Location,
    Notifications,
}

impl Permission {
    pub const ALL: [Self; 3] = [Self::Location, Self::Camera, Self::Notifications];
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::Location => write!(f, "location"),
            Self::Notifications => write!(f, "notifications"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Asks the platform for a capability
#[allow(async_fn_in_trait)]
pub trait PermissionGate {
    async fn request(&self, permission: Permission) -> PermissionStatus;
}

/// Outcome of requesting every capture permission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionReport {
    pub denied: Vec<Permission>,
}

impl PermissionReport {
    pub fn all_granted(&self) -> bool {
        self.denied.is_empty()
    }
}

/// Request location, camera and notification permissions in turn.
///
/// Denials are logged and reported but never stop the caller; the affected
/// collaborators fail later on their own.
pub async fn request_permissions<G: PermissionGate>(gate: &G) -> PermissionReport {
    let mut report = PermissionReport::default();
    for permission in Permission::ALL {
        let status = gate.request(permission).await;
        if status != PermissionStatus::Granted {
            tracing::warn!("Permission {permission} not granted ({status:?})");
            report.denied.push(permission);
        }
    }
    report
}
