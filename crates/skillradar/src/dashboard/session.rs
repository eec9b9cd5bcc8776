use serde::Serialize;
use std::sync::Mutex;

/// The dashboard's only page flag: a splash screen until the user enters,
/// then the dashboard for the rest of the session. No way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Splash,
    Dashboard,
}

impl Page {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Splash => "Splash",
            Self::Dashboard => "Dashboard",
        }
    }
}

/// Shared page state for the HTTP layer.
#[derive(Debug)]
pub struct SessionState {
    page: Mutex<Page>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            page: Mutex::new(Page::Splash),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        *self.page.lock().expect("session mutex poisoned")
    }

    /// Forward-only transition; idempotent once on the dashboard.
    pub fn enter_dashboard(&self) -> Page {
        let mut page = self.page.lock().expect("session mutex poisoned");
        *page = Page::Dashboard;
        *page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_starts_on_the_splash_page() {
        let session = SessionState::new();
        assert_eq!(session.page(), Page::Splash);
    }

    #[test]
    fn entering_the_dashboard_is_terminal() {
        let session = SessionState::new();
        assert_eq!(session.enter_dashboard(), Page::Dashboard);
        assert_eq!(session.page(), Page::Dashboard);
        // Re-entering changes nothing.
        assert_eq!(session.enter_dashboard(), Page::Dashboard);
        assert_eq!(session.page(), Page::Dashboard);
    }

    #[test]
    fn labels_match_the_pages() {
        assert_eq!(Page::Splash.label(), "Splash");
        assert_eq!(Page::Dashboard.label(), "Dashboard");
    }
}
