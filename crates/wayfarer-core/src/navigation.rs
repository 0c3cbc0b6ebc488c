//! Two-route navigation stack.

use std::fmt;

/// App screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    AddEntry,
}

impl Route {
    /// Header title for the route
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Travel Diary",
            Self::AddEntry => "Add New Entry",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "HomeScreen"),
            Self::AddEntry => write!(f, "AddEntryScreen"),
        }
    }
}

/// Stack navigator rooted at [`Route::Home`].
///
/// Going back carries no payload; the revealed screen reloads its own state
/// when it regains focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }

    /// The route on top of the stack
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigate: {} -> {route}", self.current());
        self.stack.push(route);
    }

    /// Pop the top route. Returns `false` at the root.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        let left = self.stack.pop();
        tracing::debug!("Navigate back: {left:?} -> {}", self.current());
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Route::Home);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn navigate_and_go_back() {
        let mut nav = Navigator::new();
        nav.navigate(Route::AddEntry);
        assert_eq!(nav.current(), Route::AddEntry);
        assert_eq!(nav.current().title(), "Add New Entry");

        assert!(nav.go_back());
        assert_eq!(nav.current(), Route::Home);
    }

    #[test]
    fn go_back_at_root_is_noop() {
        let mut nav = Navigator::new();
        assert!(!nav.go_back());
        assert_eq!(nav.current(), Route::Home);
    }
}
