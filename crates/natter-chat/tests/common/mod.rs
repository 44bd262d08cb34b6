#![allow(dead_code)]

use async_trait::async_trait;
use natter_billing::StaticSubscription;
use natter_chat::{ChatCreationWorkflow, HistoryRouter, SessionUser, StaticIdentity};
use natter_storage::{ChatId, ChatMember, ChatStore, CreateChatMemberParams, StoreError, UserId};
use natter_store_memory::MemoryStore;
use natter_toast::{Notifier, NotifyError, Toast};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Notifier that keeps every toast it was asked to show.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.toasts().into_iter().map(|t| t.title).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn show(&self, toast: Toast) -> Result<(), NotifyError> {
        self.toasts.lock().unwrap().push(toast);
        Ok(())
    }
}

/// Notifier whose display surface is gone.
pub struct ClosedNotifier;

#[async_trait]
impl Notifier for ClosedNotifier {
    async fn show(&self, _toast: Toast) -> Result<(), NotifyError> {
        Err(NotifyError::Closed)
    }
}

/// Memory store that can hold calls until the test releases them.
pub struct GatedStore {
    pub inner: MemoryStore,
    pub count_gate: Option<Arc<Semaphore>>,
    pub write_gate: Option<Arc<Semaphore>>,
}

impl GatedStore {
    async fn pass(gate: &Option<Arc<Semaphore>>) {
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }
    }
}

#[async_trait]
impl ChatStore for GatedStore {
    async fn count_memberships(&self, user_id: &UserId) -> Result<u64, StoreError> {
        Self::pass(&self.count_gate).await;
        self.inner.count_memberships(user_id).await
    }

    async fn create_membership(
        &self,
        params: &CreateChatMemberParams,
    ) -> Result<ChatMember, StoreError> {
        Self::pass(&self.write_gate).await;
        self.inner.create_membership(params).await
    }

    async fn get_membership(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> Result<ChatMember, StoreError> {
        self.inner.get_membership(chat_id, user_id).await
    }

    async fn list_memberships(&self, user_id: &UserId) -> Result<Vec<ChatMember>, StoreError> {
        self.inner.list_memberships(user_id).await
    }

    async fn list_chat_members(&self, chat_id: &ChatId) -> Result<Vec<ChatMember>, StoreError> {
        self.inner.list_chat_members(chat_id).await
    }
}

pub struct Harness {
    pub workflow: Arc<ChatCreationWorkflow>,
    pub notifier: Arc<RecordingNotifier>,
    pub router: Arc<HistoryRouter>,
}

pub fn alice() -> SessionUser {
    SessionUser::new("alice", "alice@example.com")
}

/// Workflow over the given store with recording notifier and router.
pub fn harness_with_store(
    user: Option<SessionUser>,
    subscription: StaticSubscription,
    store: Arc<dyn ChatStore>,
) -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let router = Arc::new(HistoryRouter::new());
    let workflow = ChatCreationWorkflow::new(
        Arc::new(StaticIdentity(user)),
        Arc::new(subscription),
        store,
        notifier.clone(),
        router.clone(),
    );
    Harness {
        workflow: Arc::new(workflow),
        notifier,
        router,
    }
}

pub fn harness(
    user: Option<SessionUser>,
    subscription: StaticSubscription,
    store: &MemoryStore,
) -> Harness {
    harness_with_store(user, subscription, Arc::new(store.clone()))
}

/// Give `user` `n` existing chats.
pub async fn seed_chats(store: &MemoryStore, user: &SessionUser, n: usize) {
    for _ in 0..n {
        store
            .create_membership(&CreateChatMemberParams {
                chat_id: ChatId::generate(),
                user_id: user.id.clone(),
                email: user.email.clone(),
                image: String::new(),
                is_admin: true,
            })
            .await
            .unwrap();
    }
}
