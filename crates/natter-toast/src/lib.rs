//! Toast notification abstraction for natter.
//!
//! A toast is a short-lived status message shown to the user, optionally with
//! one action button. This crate defines the [`Notifier`] trait so hosts can
//! render toasts however they like:
//! - Memory (in-process, tokio broadcast channel) in [`memory`]
//! - Terminal, web, native: implemented by the host

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryNotifier;

/// Visual style of a toast
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
    Success,
}

/// Button attached to a toast. Activating it navigates to `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastAction {
    pub label: String,
    /// Accessible text for screen readers
    pub alt_text: String,
    pub target: String,
}

impl ToastAction {
    pub fn new(
        label: impl Into<String>,
        alt_text: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            alt_text: alt_text.into(),
            target: target.into(),
        }
    }
}

/// A transient notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    /// Auto-dismiss after this long; `None` uses the host's default
    pub duration: Option<Duration>,
    pub action: Option<ToastAction>,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
            duration: None,
            action: None,
        }
    }

    pub fn variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn action(
        self,
        label: impl Into<String>,
        alt_text: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.with_action(ToastAction::new(label, alt_text, target))
    }

    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// Error type for notifier operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier closed")]
    Closed,
    #[error("backend error: {0}")]
    Backend(String),
}

/// Stream of toasts as they are shown
pub type ToastStream = Pin<Box<dyn Stream<Item = Toast> + Send>>;

/// Display surface for toasts.
///
/// Showing a toast is advisory: callers log failures and carry on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn show(&self, toast: Toast) -> Result<(), NotifyError>;
}
