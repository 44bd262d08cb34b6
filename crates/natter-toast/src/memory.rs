//! In-memory notifier using a tokio broadcast channel.
//!
//! Toasts are delivered to every live subscriber. A toast shown while nobody is
//! subscribed is dropped, the same way an unmounted toaster drops it.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::{Notifier, NotifyError, Toast, ToastStream};

const CHANNEL_CAPACITY: usize = 100;

/// In-memory notifier; clones share the same channel.
#[derive(Clone)]
pub struct MemoryNotifier {
    tx: broadcast::Sender<Toast>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self {
            tx: broadcast::channel(CHANNEL_CAPACITY).0,
        }
    }

    /// Subscribe to toasts shown from now on.
    pub fn subscribe(&self) -> ToastStream {
        // Lagged receivers skip what they missed
        let stream = BroadcastStream::new(self.tx.subscribe()).filter_map(|result| result.ok());
        Box::pin(stream)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn show(&self, toast: Toast) -> Result<(), NotifyError> {
        // Ignore error if no receivers (this is fine)
        let _ = self.tx.send(toast);
        Ok(())
    }
}
