use natter_chat::SessionUser;
use natter_config::{CliConfig, ConfigError, SessionProfile};
use std::path::Path;

/// Current profile, or `None` if nobody has logged in yet.
pub fn current_profile(config_path: &Path) -> Result<Option<SessionProfile>, ConfigError> {
    let config = match CliConfig::load_from(config_path) {
        Ok(config) => config,
        Err(ConfigError::NotFound) => return Ok(None),
        Err(e) => return Err(e),
    };
    match config.get_current_profile() {
        Ok(profile) => Ok(Some(profile.clone())),
        Err(ConfigError::NoProfiles) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn session_user(profile: &SessionProfile) -> SessionUser {
    let user = SessionUser::new(profile.user_id.clone(), profile.email.clone());
    match &profile.image {
        Some(image) => user.with_image(image.clone()),
        None => user,
    }
}

pub fn cmd_login(
    config_path: &Path,
    profile: SessionProfile,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::load_or_default(config_path)?;
    let name = profile.name.clone();
    let email = profile.email.clone();
    config.upsert_profile(profile);
    config.save_to(config_path)?;

    tracing::info!(profile = %name, "session saved");
    println!("Signed in as {} (profile '{}')", email, name);
    Ok(())
}

pub fn cmd_logout(
    config_path: &Path,
    name: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::load_from(config_path)?;
    let name = match name {
        Some(name) => name.to_string(),
        None => config.get_current_profile()?.name.clone(),
    };
    let removed = config.remove_profile(&name)?;
    config.save_to(config_path)?;

    println!("Signed out {} (profile '{}')", removed.email, removed.name);
    Ok(())
}

pub fn cmd_whoami(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match current_profile(config_path)? {
        None => println!("Not signed in. Run 'natter login' first."),
        Some(profile) => {
            let plan = match profile.subscription() {
                Some(sub) if sub.is_pro() => "pro".to_string(),
                Some(sub) => format!("{} ({})", sub.role, sub.status),
                None => "free".to_string(),
            };
            println!("Profile: {}", profile.name);
            println!("User ID: {}", profile.user_id);
            println!("Email:   {}", profile.email);
            println!("Plan:    {}", plan);
        }
    }
    Ok(())
}
