mod cli;
mod commands;
mod terminal;

use std::sync::Arc;

use clap::Parser;
use natter_chat::ButtonShape;
use natter_config::{CliConfig, SessionProfile};
use tracing_subscriber::EnvFilter;

use cli::{ChatCommand, Cli, Command};
use commands::*;
use terminal::TerminalNotifier;

const DEFAULT_LOG_FILTER: &str = "warn,natter=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_url = cli.db_url();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => CliConfig::default_path()?,
    };

    match cli.command {
        Command::Login {
            user_id,
            email,
            image,
            name,
            plan,
            status,
        } => {
            let profile = SessionProfile {
                name: name.unwrap_or_else(|| email.clone()),
                user_id,
                email,
                image,
                plan,
                status,
            };
            cmd_login(&config_path, profile)?;
        }
        Command::Logout { name } => {
            cmd_logout(&config_path, name.as_deref())?;
        }
        Command::Whoami => {
            cmd_whoami(&config_path)?;
        }
        Command::Chat { chat_cmd } => match chat_cmd {
            ChatCommand::Create { icon, upgrade } => {
                let shape = if icon {
                    ButtonShape::Icon
                } else {
                    ButtonShape::Large
                };
                let notifier = Arc::new(TerminalNotifier::stdout());
                cmd_chat_create(&config_path, db_url.as_deref(), shape, upgrade, notifier)
                    .await?;
            }
            ChatCommand::List => {
                cmd_chat_list(&config_path, db_url.as_deref()).await?;
            }
            ChatCommand::Members { chat_id } => {
                cmd_chat_members(db_url.as_deref(), &chat_id).await?;
            }
        },
    }

    Ok(())
}
