//! Terminal hosts for the chat workflow: toasts become printed lines.

use async_trait::async_trait;
use natter_toast::{Notifier, NotifyError, Toast, ToastVariant};
use std::io::Write;
use std::sync::Mutex;

/// Format a toast the way the terminal shows it.
pub fn format_toast(toast: &Toast) -> String {
    let marker = match toast.variant {
        ToastVariant::Default => "..",
        ToastVariant::Success => "ok",
        ToastVariant::Destructive => "!!",
    };
    let mut line = format!("[{}] {}: {}", marker, toast.title, toast.description);
    if let Some(action) = &toast.action {
        line.push_str(&format!("\n     -> {} ({})", action.label, action.target));
    }
    line
}

/// Prints toasts to a writer (stdout by default).
pub struct TerminalNotifier<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalNotifier<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> Notifier for TerminalNotifier<W> {
    async fn show(&self, toast: Toast) -> Result<(), NotifyError> {
        let mut out = self.out.lock().map_err(|_| NotifyError::Closed)?;
        writeln!(out, "{}", format_toast(&toast)).map_err(|e| NotifyError::Backend(e.to_string()))
    }
}
