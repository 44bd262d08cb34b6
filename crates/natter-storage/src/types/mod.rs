//! Type definitions for natter storage.

mod ids;
mod members;

pub use ids::*;
pub use members::*;
