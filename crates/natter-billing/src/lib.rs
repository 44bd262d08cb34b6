//! natter-billing - subscription state for the chat quota
//!
//! This crate provides:
//! - The plan (`Role`) and `SubscriptionStatus` enums as the billing provider reports them
//! - The pro-tier predicate used to lift the free chat cap
//! - A `SubscriptionSource` seam so callers can inject where the subscription comes from
//!
//! Absence of a subscription is always treated as the free plan.

use async_trait::async_trait;
use std::str::FromStr;

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Free,
    Pro,
}

/// Error type for parsing Role from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl std::fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid plan: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Free => "free",
            Role::Pro => "pro",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Role::Free),
            "pro" => Ok(Role::Pro),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// Subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Trial period (no payment required yet)
    Trialing,

    /// Active subscription
    Active,

    /// Past due (payment failed, but still in grace period)
    PastDue,

    /// Canceled (scheduled to end)
    Canceled,

    /// Unpaid (payment failed, subscription suspended)
    Unpaid,

    /// Incomplete (initial payment incomplete)
    Incomplete,

    /// Not paying at all
    Inactive,
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trialing => write!(f, "trialing"),
            Self::Active => write!(f, "active"),
            Self::PastDue => write!(f, "past_due"),
            Self::Canceled => write!(f, "canceled"),
            Self::Unpaid => write!(f, "unpaid"),
            Self::Incomplete => write!(f, "incomplete"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trialing" => Ok(Self::Trialing),
            "active" => Ok(Self::Active),
            "past_due" => Ok(Self::PastDue),
            "canceled" => Ok(Self::Canceled),
            "unpaid" => Ok(Self::Unpaid),
            "incomplete" => Ok(Self::Incomplete),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("Unknown subscription status: {}", s)),
        }
    }
}

/// Subscription information
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Subscription {
    /// Current plan
    pub role: Role,

    /// Current status
    pub status: SubscriptionStatus,
}

impl Subscription {
    pub fn new(role: Role, status: SubscriptionStatus) -> Self {
        Self { role, status }
    }

    /// Only an active pro subscription lifts the free cap. Trialing does not.
    pub fn is_pro(&self) -> bool {
        self.role == Role::Pro && self.status == SubscriptionStatus::Active
    }
}

/// Pro check for an optional subscription; `None` is the free plan.
pub fn is_pro(subscription: Option<&Subscription>) -> bool {
    subscription.is_some_and(Subscription::is_pro)
}

/// Where the caller's current subscription comes from.
#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    /// Current subscription, or `None` if the caller has never subscribed.
    async fn current(&self) -> Option<Subscription>;
}

/// Fixed subscription, for hosts that already resolved it and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSubscription(pub Option<Subscription>);

impl StaticSubscription {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn of(role: Role, status: SubscriptionStatus) -> Self {
        Self(Some(Subscription::new(role, status)))
    }
}

#[async_trait]
impl SubscriptionSource for StaticSubscription {
    async fn current(&self) -> Option<Subscription> {
        self.0
    }
}
