//! natter-chat - the "new chat" control
//!
//! Creates a chat owned by the signed-in user, capping free users at a small
//! number of chats. Every collaborator is a narrow trait:
//! - [`IdentityProvider`] for the session
//! - [`natter_billing::SubscriptionSource`] for the plan
//! - [`natter_storage::ChatStore`] for memberships
//! - [`natter_toast::Notifier`] for feedback
//! - [`Router`] for navigation

pub mod button;
pub mod config;
pub mod identity;
pub mod router;
pub mod workflow;

pub use button::{render, ButtonContent, ButtonShape, ButtonVariant, ButtonView, CreateChatButton};
pub use config::{ChatLimits, LimitsConfigError};
pub use identity::{IdentityProvider, SessionUser, StaticIdentity};
pub use router::{chat_path, HistoryRouter, Router, UPGRADE_PATH};
pub use workflow::{ChatCreationWorkflow, CreateChatError, CreateChatOutcome};
