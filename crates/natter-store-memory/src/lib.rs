//! In-memory chat membership store.
//!
//! This implementation is suitable for:
//! - Single process deployments
//! - Development and testing
//!
//! Nothing survives a restart; use natter-store-sqlite for durable storage.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use natter_storage::{ChatId, ChatMember, ChatStore, CreateChatMemberParams, StoreError, UserId};
use std::sync::Arc;

/// In-memory store keyed by `(chat_id, user_id)`.
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct MemoryStore {
    members: Arc<DashMap<(ChatId, UserId), ChatMember>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            members: Arc::new(DashMap::new()),
        }
    }

    /// Total number of stored memberships across all users.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn count_memberships(&self, user_id: &UserId) -> Result<u64, StoreError> {
        let count = self
            .members
            .iter()
            .filter(|entry| &entry.key().1 == user_id)
            .count();
        Ok(count as u64)
    }

    async fn create_membership(
        &self,
        params: &CreateChatMemberParams,
    ) -> Result<ChatMember, StoreError> {
        let member = params.clone().into_member(Utc::now());
        // Last write wins for the same key
        self.members.insert(
            (params.chat_id, params.user_id.clone()),
            member.clone(),
        );
        Ok(member)
    }

    async fn get_membership(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> Result<ChatMember, StoreError> {
        self.members
            .get(&(*chat_id, user_id.clone()))
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn list_memberships(&self, user_id: &UserId) -> Result<Vec<ChatMember>, StoreError> {
        let mut out: Vec<ChatMember> = self
            .members
            .iter()
            .filter(|entry| &entry.key().1 == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(out)
    }

    async fn list_chat_members(&self, chat_id: &ChatId) -> Result<Vec<ChatMember>, StoreError> {
        let mut out: Vec<ChatMember> = self
            .members
            .iter()
            .filter(|entry| &entry.key().0 == chat_id)
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| b.is_admin.cmp(&a.is_admin).then_with(|| a.email.cmp(&b.email)));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(chat_id: ChatId, user: &str, is_admin: bool) -> CreateChatMemberParams {
        CreateChatMemberParams {
            chat_id,
            user_id: UserId(user.to_string()),
            email: format!("{}@example.com", user),
            image: String::new(),
            is_admin,
        }
    }

    #[tokio::test]
    async fn count_only_includes_the_users_memberships() {
        let store = MemoryStore::new();
        let alice = UserId("alice".to_string());

        assert_eq!(store.count_memberships(&alice).await.unwrap(), 0);

        store
            .create_membership(&params(ChatId::generate(), "alice", true))
            .await
            .unwrap();
        store
            .create_membership(&params(ChatId::generate(), "alice", true))
            .await
            .unwrap();
        store
            .create_membership(&params(ChatId::generate(), "bob", true))
            .await
            .unwrap();

        assert_eq!(store.count_memberships(&alice).await.unwrap(), 2);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn same_key_overwrites() {
        let store = MemoryStore::new();
        let chat_id = ChatId::generate();

        store
            .create_membership(&params(chat_id, "alice", false))
            .await
            .unwrap();
        let mut second = params(chat_id, "alice", true);
        second.image = "https://img.example.com/a.png".to_string();
        store.create_membership(&second).await.unwrap();

        assert_eq!(store.len(), 1);
        let member = store
            .get_membership(&chat_id, &UserId("alice".to_string()))
            .await
            .unwrap();
        assert!(member.is_admin);
        assert_eq!(member.image, "https://img.example.com/a.png");
    }

    #[tokio::test]
    async fn get_missing_membership_is_not_found() {
        let store = MemoryStore::new();
        let result = store
            .get_membership(&ChatId::generate(), &UserId("nobody".to_string()))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn chat_members_list_admins_first() {
        let store = MemoryStore::new();
        let chat_id = ChatId::generate();

        store
            .create_membership(&params(chat_id, "carol", false))
            .await
            .unwrap();
        store
            .create_membership(&params(chat_id, "zed", true))
            .await
            .unwrap();
        store
            .create_membership(&params(chat_id, "bob", false))
            .await
            .unwrap();
        store
            .create_membership(&params(ChatId::generate(), "alice", true))
            .await
            .unwrap();

        let members = store.list_chat_members(&chat_id).await.unwrap();
        let users: Vec<&str> = members.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(users, vec!["zed", "bob", "carol"]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryStore::default();
        let clone = store.clone();
        clone
            .create_membership(&params(ChatId::generate(), "alice", true))
            .await
            .unwrap();
        assert!(!store.is_empty());
        let listed = store
            .list_memberships(&UserId("alice".to_string()))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }
}
