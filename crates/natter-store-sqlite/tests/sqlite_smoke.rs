use natter_storage::{ChatId, ChatStore, CreateChatMemberParams, StoreError, UserId};
use natter_store_sqlite::SqliteStore;

fn member_params(chat_id: ChatId, user: &str, is_admin: bool) -> CreateChatMemberParams {
    CreateChatMemberParams {
        chat_id,
        user_id: UserId(user.to_string()),
        email: format!("{}@example.com", user),
        image: String::new(),
        is_admin,
    }
}

#[tokio::test]
async fn end_to_end_membership_lifecycle() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    let alice = UserId("alice".to_string());

    assert_eq!(s.count_memberships(&alice).await.unwrap(), 0);

    let chat_id = ChatId::generate();
    let written = s
        .create_membership(&CreateChatMemberParams {
            chat_id,
            user_id: alice.clone(),
            email: "alice@example.com".to_string(),
            image: "https://img.example.com/alice.png".to_string(),
            is_admin: true,
        })
        .await
        .unwrap();

    assert_eq!(s.count_memberships(&alice).await.unwrap(), 1);

    let fetched = s.get_membership(&chat_id, &alice).await.unwrap();
    assert_eq!(fetched, written);
    assert!(fetched.is_admin);
    assert_eq!(fetched.image, "https://img.example.com/alice.png");
}

#[tokio::test]
async fn upsert_on_same_key_keeps_one_row() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    let chat_id = ChatId::generate();
    let alice = UserId("alice".to_string());

    s.create_membership(&member_params(chat_id, "alice", false))
        .await
        .unwrap();
    let mut second = member_params(chat_id, "alice", true);
    second.email = "alice@new.example.com".to_string();
    s.create_membership(&second).await.unwrap();

    assert_eq!(s.count_memberships(&alice).await.unwrap(), 1);
    let member = s.get_membership(&chat_id, &alice).await.unwrap();
    assert!(member.is_admin);
    assert_eq!(member.email, "alice@new.example.com");
}

#[tokio::test]
async fn counts_are_scoped_per_user() {
    let s = SqliteStore::open_in_memory().await.unwrap();

    for _ in 0..3 {
        s.create_membership(&member_params(ChatId::generate(), "alice", true))
            .await
            .unwrap();
    }
    s.create_membership(&member_params(ChatId::generate(), "bob", true))
        .await
        .unwrap();

    assert_eq!(
        s.count_memberships(&UserId("alice".to_string()))
            .await
            .unwrap(),
        3
    );
    assert_eq!(
        s.count_memberships(&UserId("bob".to_string())).await.unwrap(),
        1
    );
    assert_eq!(
        s.list_memberships(&UserId("alice".to_string()))
            .await
            .unwrap()
            .len(),
        3
    );
}

#[tokio::test]
async fn chat_members_admins_first_then_email() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    let chat_id = ChatId::generate();

    s.create_membership(&member_params(chat_id, "carol", false))
        .await
        .unwrap();
    s.create_membership(&member_params(chat_id, "zed", true))
        .await
        .unwrap();
    s.create_membership(&member_params(chat_id, "bob", false))
        .await
        .unwrap();

    let members = s.list_chat_members(&chat_id).await.unwrap();
    let users: Vec<&str> = members.iter().map(|m| m.user_id.as_str()).collect();
    assert_eq!(users, vec!["zed", "bob", "carol"]);
}

#[tokio::test]
async fn missing_membership_is_not_found() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    let err = s
        .get_membership(&ChatId::generate(), &UserId("ghost".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn file_backed_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("natter.db").to_string_lossy()
    );
    let chat_id = ChatId::generate();

    {
        let s = SqliteStore::open(&url).await.unwrap();
        s.create_membership(&member_params(chat_id, "alice", true))
            .await
            .unwrap();
    }

    let reopened = SqliteStore::open(&url).await.unwrap();
    let member = reopened
        .get_membership(&chat_id, &UserId("alice".to_string()))
        .await
        .unwrap();
    assert_eq!(member.chat_id, chat_id);
}
