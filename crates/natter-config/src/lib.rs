use natter_billing::{Role, Subscription, SubscriptionStatus};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found. Run 'natter login' first.")]
    NotFound,
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No profiles configured")]
    NoProfiles,
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),
    #[error("Failed to get home directory")]
    NoHomeDir,
}

/// Main user configuration stored in ~/.natter/config.json
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CliConfig {
    pub profiles: Vec<SessionProfile>,
    #[serde(default)]
    pub current_profile: Option<String>, // Name of current profile
}

/// A signed-in session: who the user is and what they pay for
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionProfile {
    pub name: String,
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>, // Avatar URL
    #[serde(default)]
    pub plan: Role,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>, // None = never subscribed
}

impl CliConfig {
    /// Load config from custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound
            } else {
                ConfigError::Read(e)
            }
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load config, or start empty if there is none yet
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load_from(path) {
            Err(ConfigError::NotFound) => Ok(Self::default()),
            other => other,
        }
    }

    /// Save config to custom path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&self)?)?;
        Ok(())
    }

    /// Get default config path (~/.natter/config.json)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(".natter")
            .join("config.json"))
    }

    /// Get the current active profile
    pub fn get_current_profile(&self) -> Result<&SessionProfile, ConfigError> {
        let profile_name = self
            .current_profile
            .as_ref()
            .or_else(|| self.profiles.first().map(|p| &p.name))
            .ok_or(ConfigError::NoProfiles)?;

        self.profiles
            .iter()
            .find(|p| &p.name == profile_name)
            .ok_or_else(|| ConfigError::ProfileNotFound(profile_name.clone()))
    }

    /// Insert or replace a profile by name and make it current
    pub fn upsert_profile(&mut self, profile: SessionProfile) {
        let name = profile.name.clone();
        match self.profiles.iter_mut().find(|p| p.name == name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
        self.current_profile = Some(name);
    }

    /// Remove a profile; clears the current pointer if it named it
    pub fn remove_profile(&mut self, name: &str) -> Result<SessionProfile, ConfigError> {
        let idx = self
            .profiles
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;
        let removed = self.profiles.remove(idx);
        if self.current_profile.as_deref() == Some(name) {
            self.current_profile = None;
        }
        Ok(removed)
    }
}

impl SessionProfile {
    /// Subscription as recorded for this session, if the user ever subscribed
    pub fn subscription(&self) -> Option<Subscription> {
        self.status.map(|status| Subscription::new(self.plan, status))
    }
}
