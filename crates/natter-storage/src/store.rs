//! The ChatStore trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait the chat workflow depends on.
///
/// Memberships are addressed by the pair `(chat_id, user_id)`. Reads are
/// point-in-time; nothing here is transactional across calls.
#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait::async_trait]
pub trait ChatStore: Send + Sync {
    // ───────────────────────────────────── Memberships ────────────────────────────────────

    /// Count the chat memberships owned by a user.
    async fn count_memberships(&self, user_id: &UserId) -> Result<u64, StoreError>;

    /// Create a membership, or overwrite the one already stored under the same
    /// `(chat_id, user_id)`. The store assigns the timestamp.
    async fn create_membership(
        &self,
        params: &CreateChatMemberParams,
    ) -> Result<ChatMember, StoreError>;

    /// Get a single membership.
    async fn get_membership(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> Result<ChatMember, StoreError>;

    /// List all memberships of a user, newest first.
    async fn list_memberships(&self, user_id: &UserId) -> Result<Vec<ChatMember>, StoreError>;

    /// List all members of a chat, admins first, then by email.
    async fn list_chat_members(&self, chat_id: &ChatId) -> Result<Vec<ChatMember>, StoreError>;
}
