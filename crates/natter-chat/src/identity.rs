use async_trait::async_trait;
use natter_storage::UserId;

/// The signed-in user as the identity provider reports it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    pub image: Option<String>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId(id.into()),
            email: email.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Source of the current session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The authenticated user, or `None` when nobody is signed in.
    async fn current_user(&self) -> Option<SessionUser>;
}

/// Fixed session, for hosts that resolved it up front and for tests.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentity(pub Option<SessionUser>);

impl StaticIdentity {
    pub fn signed_in(user: SessionUser) -> Self {
        Self(Some(user))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Option<SessionUser> {
        self.0.clone()
    }
}
