use clap::{Parser, Subcommand};
use natter_billing::{Role, SubscriptionStatus};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "natter")]
#[command(about = "natter chat client")]
pub struct Cli {
    /// Database URL (sqlite://...)
    #[arg(long, env = "NATTER_DATABASE_URL", conflicts_with = "db")]
    pub database_url: Option<String>,

    /// Path to a SQLite database file
    #[arg(long)]
    pub db: Option<String>,

    /// Path to the session config (defaults to ~/.natter/config.json)
    #[arg(long, env = "NATTER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Save a signed-in session and make it current
    Login {
        /// User id as issued by the identity provider
        #[arg(long)]
        user_id: String,

        /// Your email
        #[arg(long)]
        email: String,

        /// Avatar URL
        #[arg(long)]
        image: Option<String>,

        /// Profile name (defaults to the email)
        #[arg(long)]
        name: Option<String>,

        /// Subscription plan (free, pro)
        #[arg(long, default_value = "free")]
        plan: Role,

        /// Subscription status (active, trialing, past_due, ...); omit if never subscribed
        #[arg(long)]
        status: Option<SubscriptionStatus>,
    },
    /// Forget a session (defaults to the current one)
    Logout {
        #[arg(long)]
        name: Option<String>,
    },
    /// Show the current session
    Whoami,
    /// Chat commands
    Chat {
        #[command(subcommand)]
        chat_cmd: ChatCommand,
    },
}

#[derive(Subcommand)]
pub enum ChatCommand {
    /// Create a new chat and open it
    Create {
        /// Use the compact icon button
        #[arg(long)]
        icon: bool,

        /// Open the upgrade page if the free plan limit is reached
        #[arg(long)]
        upgrade: bool,
    },
    /// List your chats
    List,
    /// List the members of a chat
    Members {
        /// Chat ID
        chat_id: String,
    },
}

impl Cli {
    /// Resolve the database URL from `--database-url` / `--db`; `None` means the default store.
    pub fn db_url(&self) -> Option<String> {
        if let Some(url) = &self.database_url {
            return Some(url.clone());
        }
        self.db.as_ref().map(|path| {
            if path.starts_with("sqlite:") {
                path.clone()
            } else {
                format!("sqlite://{}?mode=rwc", path)
            }
        })
    }
}
