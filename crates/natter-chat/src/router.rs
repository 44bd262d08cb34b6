//! In-app navigation.

use natter_storage::ChatId;
use std::sync::Mutex;

/// Upgrade page offered when the free cap is hit
pub const UPGRADE_PATH: &str = "/register";

/// Detail page of a chat
pub fn chat_path(chat_id: &ChatId) -> String {
    format!("/chat/{}", chat_id)
}

/// Navigates the application to a path.
pub trait Router: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Router that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct HistoryRouter {
    history: Mutex<Vec<String>>,
}

impl HistoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last path navigated to
    pub fn current(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    /// Every path navigated to, oldest first
    pub fn history(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Router for HistoryRouter {
    fn navigate_to(&self, path: &str) {
        tracing::debug!(path, "navigate");
        self.lock().push(path.to_string());
    }
}
