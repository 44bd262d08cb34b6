//! Chat membership types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChatId, UserId};

/// Chat membership record: one user's seat in one chat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMember {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub email: String,
    pub image: String, // empty when the user has no avatar
    pub is_admin: bool,
    pub timestamp: DateTime<Utc>, // assigned by the store on write
}

/// Parameters for creating (or overwriting) a chat membership.
///
/// Keyed by `(chat_id, user_id)`. Writing the same key twice leaves one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateChatMemberParams {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub email: String,
    pub image: String,
    pub is_admin: bool,
}

impl CreateChatMemberParams {
    /// Materialize the record as the store sees it at `timestamp`.
    pub fn into_member(self, timestamp: DateTime<Utc>) -> ChatMember {
        ChatMember {
            chat_id: self.chat_id,
            user_id: self.user_id,
            email: self.email,
            image: self.image,
            is_admin: self.is_admin,
            timestamp,
        }
    }
}
