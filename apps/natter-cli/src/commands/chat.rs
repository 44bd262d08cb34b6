use std::path::Path;
use std::sync::Arc;

use natter_billing::StaticSubscription;
use natter_chat::{
    ButtonShape, ChatCreationWorkflow, ChatLimits, CreateChatButton, CreateChatOutcome,
    HistoryRouter, Router, StaticIdentity,
};
use natter_config::SessionProfile;
use natter_storage::{ChatId, ChatStore, StoreError, UserId};
use natter_store_sqlite::SqliteStore;
use natter_toast::Notifier;

use super::session::{current_profile, session_user};

pub async fn open_store(db_url: Option<&str>) -> Result<SqliteStore, StoreError> {
    match db_url {
        Some(url) => SqliteStore::open(url).await,
        None => SqliteStore::open_default().await,
    }
}

/// Wire the workflow to a session profile; no profile means nobody is signed in.
pub fn build_workflow(
    profile: Option<&SessionProfile>,
    store: Arc<dyn ChatStore>,
    notifier: Arc<dyn Notifier>,
    router: Arc<dyn Router>,
    limits: ChatLimits,
) -> ChatCreationWorkflow {
    let identity = StaticIdentity(profile.map(session_user));
    let subscription = StaticSubscription(profile.and_then(SessionProfile::subscription));
    ChatCreationWorkflow::new(
        Arc::new(identity),
        Arc::new(subscription),
        store,
        notifier,
        router,
    )
    .with_limits(limits)
}

/// Press the button once and report what happened.
///
/// With `upgrade`, a rejected press follows the toast's upgrade action.
pub async fn press(
    button: &CreateChatButton,
    router: &HistoryRouter,
    upgrade: bool,
) -> CreateChatOutcome {
    println!("{}", button.view());
    let visited = router.history().len();
    let outcome = button.click().await;
    match outcome {
        CreateChatOutcome::Unauthenticated => {
            println!("Not signed in. Run 'natter login' first.");
        }
        CreateChatOutcome::AlreadyRunning => {
            println!("A chat is already being created.");
        }
        CreateChatOutcome::QuotaExceeded { .. } => {
            let action = button.workflow().upgrade_action();
            if upgrade {
                button.workflow().follow_action(&action);
            } else {
                println!("Run 'natter chat create --upgrade' to open {}", action.target);
            }
        }
        CreateChatOutcome::Created(_) | CreateChatOutcome::Failed => {}
    }
    if let Some(path) = router.history().get(visited) {
        println!("Opened {}", path);
    }
    println!("{}", button.view());
    outcome
}

pub async fn cmd_chat_create(
    config_path: &Path,
    db_url: Option<&str>,
    shape: ButtonShape,
    upgrade: bool,
    notifier: Arc<dyn Notifier>,
) -> Result<CreateChatOutcome, Box<dyn std::error::Error>> {
    let profile = current_profile(config_path)?;
    let store = Arc::new(open_store(db_url).await?);
    let router = Arc::new(HistoryRouter::new());
    let limits = ChatLimits::from_env()?;

    let workflow = build_workflow(profile.as_ref(), store, notifier, router.clone(), limits);
    let button = CreateChatButton::new(shape, Arc::new(workflow));
    Ok(press(&button, &router, upgrade).await)
}

pub async fn cmd_chat_list(
    config_path: &Path,
    db_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(profile) = current_profile(config_path)? else {
        println!("Not signed in. Run 'natter login' first.");
        return Ok(());
    };
    let store = open_store(db_url).await?;
    let chats = store
        .list_memberships(&UserId(profile.user_id.clone()))
        .await?;

    if chats.is_empty() {
        println!("No chats found.");
        return Ok(());
    }

    let limits = ChatLimits::from_env()?;
    let is_pro = profile.subscription().is_some_and(|s| s.is_pro());
    if is_pro {
        println!("Chats ({}, pro plan):", chats.len());
    } else {
        println!(
            "Chats ({}/{}, free plan):",
            chats.len(),
            limits.free_chat_limit
        );
    }
    for chat in chats {
        let role = if chat.is_admin { "admin" } else { "member" };
        println!(
            "  {} ({}, {})",
            chat.chat_id,
            role,
            chat.timestamp.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub async fn cmd_chat_members(
    db_url: Option<&str>,
    chat_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let chat_id: ChatId = chat_id.parse()?;
    let store = open_store(db_url).await?;
    let members = store.list_chat_members(&chat_id).await?;

    if members.is_empty() {
        println!("No members found for chat {}.", chat_id);
    } else {
        println!("Members of {}:", chat_id);
        for member in members {
            let role = if member.is_admin { " (admin)" } else { "" };
            println!("  {} <{}>{}", member.user_id, member.email, role);
        }
    }
    Ok(())
}
