//! Storage abstraction for natter.
//!
//! Backend crates (e.g., natter-store-memory, natter-store-sqlite) implement
//! [`ChatStore`] so the chat workflow doesn't depend on any specific database
//! engine or schema details.

use thiserror::Error;

mod store;
mod types;

pub use store::ChatStore;
#[cfg(any(test, feature = "test-support"))]
pub use store::MockChatStore;
pub use types::*;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("conflict")]
    Conflict,
    #[error("backend error: {0}")]
    Backend(String),
}
