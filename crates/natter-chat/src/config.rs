//! Chat creation limits.
//!
//! Supports configuration via environment variables:
//!
//! ```bash
//! NATTER_FREE_CHAT_LIMIT=3          # chats a non-pro user may own
//! NATTER_PROGRESS_TOAST_MS=3000     # "creating..." toast lifetime
//! NATTER_SUCCESS_TOAST_MS=2000      # "ready" toast lifetime
//! NATTER_UPGRADE_PATH=/register     # where the upgrade action navigates
//! ```

use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_FREE_CHAT_LIMIT: u64 = 3;
pub const DEFAULT_PROGRESS_TOAST_MS: u64 = 3000;
pub const DEFAULT_SUCCESS_TOAST_MS: u64 = 2000;
pub const DEFAULT_UPGRADE_PATH: &str = crate::router::UPGRADE_PATH;

/// Limits and timings applied by the chat creation workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLimits {
    /// Non-pro users owning this many chats or more are refused a new one
    pub free_chat_limit: u64,
    pub progress_toast: Duration,
    pub success_toast: Duration,
    pub upgrade_path: String,
}

impl Default for ChatLimits {
    fn default() -> Self {
        Self {
            free_chat_limit: DEFAULT_FREE_CHAT_LIMIT,
            progress_toast: Duration::from_millis(DEFAULT_PROGRESS_TOAST_MS),
            success_toast: Duration::from_millis(DEFAULT_SUCCESS_TOAST_MS),
            upgrade_path: DEFAULT_UPGRADE_PATH.to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimitsConfigError {
    #[error("Invalid {name} value '{value}': expected a non-negative number")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid {name} value '{value}': must start with '/'")]
    InvalidPath { name: &'static str, value: String },
}

impl ChatLimits {
    /// Load limits from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, LimitsConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load limits from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LimitsConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |name: &'static str, default: u64| match lookup(name) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| LimitsConfigError::InvalidNumber { name, value }),
        };

        let free_chat_limit = number("NATTER_FREE_CHAT_LIMIT", DEFAULT_FREE_CHAT_LIMIT)?;
        let progress_ms = number("NATTER_PROGRESS_TOAST_MS", DEFAULT_PROGRESS_TOAST_MS)?;
        let success_ms = number("NATTER_SUCCESS_TOAST_MS", DEFAULT_SUCCESS_TOAST_MS)?;

        let upgrade_path = match lookup("NATTER_UPGRADE_PATH") {
            None => DEFAULT_UPGRADE_PATH.to_string(),
            Some(value) if value.starts_with('/') => value,
            Some(value) => {
                return Err(LimitsConfigError::InvalidPath {
                    name: "NATTER_UPGRADE_PATH",
                    value,
                })
            }
        };

        Ok(Self {
            free_chat_limit,
            progress_toast: Duration::from_millis(progress_ms),
            success_toast: Duration::from_millis(success_ms),
            upgrade_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let limits = ChatLimits::from_lookup(lookup(&[])).unwrap();
        assert_eq!(limits, ChatLimits::default());
        assert_eq!(limits.free_chat_limit, 3);
        assert_eq!(limits.progress_toast, Duration::from_millis(3000));
        assert_eq!(limits.success_toast, Duration::from_millis(2000));
        assert_eq!(limits.upgrade_path, "/register");
    }

    #[test]
    fn overrides_are_applied() {
        let limits = ChatLimits::from_lookup(lookup(&[
            ("NATTER_FREE_CHAT_LIMIT", "5"),
            ("NATTER_PROGRESS_TOAST_MS", " 1500 "),
            ("NATTER_UPGRADE_PATH", "/pricing"),
        ]))
        .unwrap();
        assert_eq!(limits.free_chat_limit, 5);
        assert_eq!(limits.progress_toast, Duration::from_millis(1500));
        assert_eq!(limits.success_toast, Duration::from_millis(2000));
        assert_eq!(limits.upgrade_path, "/pricing");
    }

    #[test]
    fn invalid_number_is_rejected() {
        let err = ChatLimits::from_lookup(lookup(&[("NATTER_FREE_CHAT_LIMIT", "three")]))
            .unwrap_err();
        assert_eq!(
            err,
            LimitsConfigError::InvalidNumber {
                name: "NATTER_FREE_CHAT_LIMIT",
                value: "three".to_string()
            }
        );
        assert!(err.to_string().contains("three"));

        assert!(ChatLimits::from_lookup(lookup(&[("NATTER_SUCCESS_TOAST_MS", "-1")])).is_err());
    }

    #[test]
    fn relative_upgrade_path_is_rejected() {
        let err =
            ChatLimits::from_lookup(lookup(&[("NATTER_UPGRADE_PATH", "register")])).unwrap_err();
        assert!(matches!(err, LimitsConfigError::InvalidPath { .. }));
    }
}
