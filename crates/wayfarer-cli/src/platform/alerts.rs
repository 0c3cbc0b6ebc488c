use wayfarer_core::capture::Alerts;

/// Prints alerts to stderr as `Title: message`
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalAlerts;

impl Alerts for TerminalAlerts {
    fn alert(&self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}
