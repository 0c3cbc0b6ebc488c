use wayfarer_core::capture::{Permission, PermissionGate, PermissionStatus};

/// Permission answers for a terminal session.
///
/// There is no camera to drive from the terminal; everything else is
/// implicitly granted by running the command.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPermissions;

impl PermissionGate for TerminalPermissions {
    async fn request(&self, permission: Permission) -> PermissionStatus {
        match permission {
            Permission::Camera => PermissionStatus::Denied,
            Permission::Location | Permission::Notifications => PermissionStatus::Granted,
        }
    }
}
