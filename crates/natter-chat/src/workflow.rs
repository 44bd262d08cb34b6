//! Chat creation: admission check against the free cap, then one membership write.
//!
//! Per invocation: `Idle -> Checking -> {Rejected | Writing} -> {Succeeded | Failed} -> Idle`.
//! The count and the write are separate, non-transactional store calls, so the
//! cap is soft: two sessions of the same user racing may both get through.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use natter_billing::{is_pro, SubscriptionSource};
use natter_storage::{ChatId, ChatStore, CreateChatMemberParams, StoreError};
use natter_toast::{Notifier, Toast, ToastAction, ToastVariant};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ChatLimits;
use crate::identity::{IdentityProvider, SessionUser};
use crate::router::{chat_path, Router};

/// What a single `create_new_chat` call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateChatOutcome {
    /// Nobody signed in; nothing happened
    Unauthenticated,
    /// Another creation on this workflow was still running; nothing happened
    AlreadyRunning,
    /// Free cap reached; the upgrade toast was shown
    QuotaExceeded { count: u64, limit: u64 },
    /// Membership written and navigated to
    Created(ChatId),
    /// Store failure; the generic error toast was shown
    Failed,
}

/// Failures that reach the workflow boundary
#[derive(Debug, Error)]
pub enum CreateChatError {
    #[error("free plan limit reached ({count}/{limit})")]
    QuotaExceeded { count: u64, limit: u64 },

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Clears the loading flag on every exit path.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ChatCreationWorkflow {
    identity: Arc<dyn IdentityProvider>,
    subscriptions: Arc<dyn SubscriptionSource>,
    store: Arc<dyn ChatStore>,
    notifier: Arc<dyn Notifier>,
    router: Arc<dyn Router>,
    limits: ChatLimits,
    loading: AtomicBool,
}

impl ChatCreationWorkflow {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        subscriptions: Arc<dyn SubscriptionSource>,
        store: Arc<dyn ChatStore>,
        notifier: Arc<dyn Notifier>,
        router: Arc<dyn Router>,
    ) -> Self {
        Self {
            identity,
            subscriptions,
            store,
            notifier,
            router,
            limits: ChatLimits::default(),
            loading: AtomicBool::new(false),
        }
    }

    pub fn with_limits(mut self, limits: ChatLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Action offered on the free-plan limit toast.
    pub fn upgrade_action(&self) -> ToastAction {
        ToastAction::new("Upgrade to PRO", "Upgrade", self.limits.upgrade_path.clone())
    }

    /// Activate a toast action by navigating to its target.
    pub fn follow_action(&self, action: &ToastAction) {
        info!(path = %action.target, label = %action.label, "toast action activated");
        self.router.navigate_to(&action.target);
    }

    /// True while a creation is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Create a new chat owned by the signed-in user and navigate to it.
    ///
    /// Never fails outward: every failure becomes a toast and an outcome.
    pub async fn create_new_chat(&self) -> CreateChatOutcome {
        let user = match self.identity.current_user().await {
            Some(user) if !user.id.is_empty() => user,
            _ => return CreateChatOutcome::Unauthenticated,
        };

        let Some(_loading) = LoadingGuard::acquire(&self.loading) else {
            debug!(user_id = %user.id, "chat creation already in progress");
            return CreateChatOutcome::AlreadyRunning;
        };

        self.notify(
            Toast::new(
                "Talking the talk...",
                "Hold tight while we create your new chat...",
            )
            .duration(self.limits.progress_toast),
        )
        .await;

        match self.admit_and_write(&user).await {
            Ok(chat_id) => {
                info!(user_id = %user.id, %chat_id, "chat created");
                self.notify(
                    Toast::new("Success", "Your new chat is ready!")
                        .variant(ToastVariant::Success)
                        .duration(self.limits.success_toast),
                )
                .await;
                self.router.navigate_to(&chat_path(&chat_id));
                CreateChatOutcome::Created(chat_id)
            }
            Err(CreateChatError::QuotaExceeded { count, limit }) => {
                info!(user_id = %user.id, count, limit, "free plan chat limit reached");
                self.notify(
                    Toast::new(
                        "Free plan limit exceeded",
                        "You've exceeded the limit of chats for the FREE plan. \
                         Please upgrade to PRO to continue creating chats!",
                    )
                    .variant(ToastVariant::Destructive)
                    .with_action(self.upgrade_action()),
                )
                .await;
                CreateChatOutcome::QuotaExceeded { count, limit }
            }
            Err(CreateChatError::Store(e)) => {
                warn!(user_id = %user.id, error = %e, "chat creation failed");
                self.notify(
                    Toast::new("Error", "Something went wrong!").variant(ToastVariant::Destructive),
                )
                .await;
                CreateChatOutcome::Failed
            }
        }
    }

    async fn admit_and_write(&self, user: &SessionUser) -> Result<ChatId, CreateChatError> {
        let count = self.store.count_memberships(&user.id).await?;
        let subscription = self.subscriptions.current().await;
        let limit = self.limits.free_chat_limit;
        let pro = is_pro(subscription.as_ref());
        debug!(user_id = %user.id, count, limit, pro, "checking chat quota");

        if !pro && count >= limit {
            return Err(CreateChatError::QuotaExceeded { count, limit });
        }

        let chat_id = ChatId::generate();
        self.store
            .create_membership(&CreateChatMemberParams {
                chat_id,
                user_id: user.id.clone(),
                email: user.email.clone(),
                image: user.image.clone().unwrap_or_default(),
                is_admin: true,
            })
            .await?;
        Ok(chat_id)
    }

    async fn notify(&self, toast: Toast) {
        if let Err(e) = self.notifier.show(toast).await {
            warn!(error = %e, "failed to show toast");
        }
    }
}
