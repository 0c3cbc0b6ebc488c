//! Light/dark theme state shared by the screens.
//!
//! The state is an explicit handle: consumers receive a [`ThemeState`] (or a
//! receiver subscribed from it) instead of looking it up ambiently.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Environment override for the system appearance (`light` or `dark`)
pub const APPEARANCE_ENV: &str = "WAYFARER_APPEARANCE";

/// Theme mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow system preference
    #[default]
    System,
}

/// Resolved theme (light or dark)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The explicit mode that pins this theme
    pub const fn as_mode(self) -> ThemeMode {
        match self {
            Self::Light => ThemeMode::Light,
            Self::Dark => ThemeMode::Dark,
        }
    }

    /// Label of the header toggle button (shows the theme it switches to)
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Resolve theme mode to actual light/dark theme
pub const fn resolve_theme(mode: ThemeMode, system: ResolvedTheme) -> ResolvedTheme {
    match mode {
        ThemeMode::Light => ResolvedTheme::Light,
        ThemeMode::Dark => ResolvedTheme::Dark,
        ThemeMode::System => system,
    }
}

/// Detect the system appearance from the environment
pub fn detect_system_theme() -> ResolvedTheme {
    system_theme_from(
        std::env::var(APPEARANCE_ENV).ok().as_deref(),
        std::env::var("GTK_THEME").ok().as_deref(),
    )
}

fn system_theme_from(appearance: Option<&str>, gtk_theme: Option<&str>) -> ResolvedTheme {
    if let Some(value) = appearance.map(str::trim).filter(|value| !value.is_empty()) {
        if value.eq_ignore_ascii_case("dark") {
            return ResolvedTheme::Dark;
        }
        if value.eq_ignore_ascii_case("light") {
            return ResolvedTheme::Light;
        }
        tracing::warn!("Ignoring unknown {APPEARANCE_ENV} value '{value}'");
    }

    if let Some(theme) = gtk_theme {
        let is_dark = theme.to_lowercase().contains("dark");
        tracing::debug!(
            "System theme detected from GTK_THEME: {}",
            if is_dark { "dark" } else { "light" }
        );
        return if is_dark {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        };
    }

    tracing::debug!("No appearance hint set, defaulting to light mode");
    ResolvedTheme::Light
}

/// Observable light/dark flag.
///
/// Initialized once from the configured mode and the system appearance;
/// changed only by [`ThemeState::toggle`] or [`ThemeState::set`].
#[derive(Debug)]
pub struct ThemeState {
    sender: watch::Sender<ResolvedTheme>,
}

impl ThemeState {
    pub fn new(mode: ThemeMode, system: ResolvedTheme) -> Self {
        let (sender, _) = watch::channel(resolve_theme(mode, system));
        Self { sender }
    }

    /// Initialize from the configured mode and the detected system appearance
    pub fn from_system(mode: ThemeMode) -> Self {
        Self::new(mode, detect_system_theme())
    }

    pub fn current(&self) -> ResolvedTheme {
        *self.sender.borrow()
    }

    pub fn is_dark(&self) -> bool {
        self.current().is_dark()
    }

    /// Flip between light and dark; returns the new theme
    pub fn toggle(&self) -> ResolvedTheme {
        self.sender.send_modify(|theme| *theme = theme.toggled());
        let theme = self.current();
        tracing::info!("Theme switched to {theme}");
        theme
    }

    pub fn set(&self, theme: ResolvedTheme) {
        self.sender.send_replace(theme);
    }

    /// Receiver notified on every change
    pub fn subscribe(&self) -> watch::Receiver<ResolvedTheme> {
        self.sender.subscribe()
    }
}
