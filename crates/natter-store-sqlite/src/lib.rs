use chrono::{DateTime, Utc};
use natter_storage::{ChatId, ChatMember, ChatStore, CreateChatMemberParams, StoreError, UserId};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use uuid::Uuid;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

type MemberRow = (String, String, String, String, i64, i64);

const MEMBER_COLUMNS: &str = "chat_id,user_id,email,image,is_admin,created_at";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// `~/.natter/store.db` (creates dir with 0700 perms on unix)
    pub async fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::home_dir()
            .ok_or_else(|| StoreError::Backend("no home dir".into()))?
            .join(".natter");
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        let path = dir.join("store.db");
        let url = format!("sqlite://{}?mode=rwc", path.to_string_lossy());
        Self::open(&url).await
    }

    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Self::open("sqlite::memory:").await
    }

    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        tracing::debug!(url, "sqlite store ready");
        Ok(Self { pool })
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn member_from_row(row: MemberRow) -> Result<ChatMember, StoreError> {
    let (chat_id, user_id, email, image, is_admin, created_at) = row;
    let chat_id = Uuid::try_parse(&chat_id).map_err(|e| StoreError::Backend(e.to_string()))?;
    let timestamp = DateTime::<Utc>::from_timestamp_millis(created_at)
        .ok_or_else(|| StoreError::Backend(format!("invalid timestamp: {}", created_at)))?;
    Ok(ChatMember {
        chat_id: ChatId(chat_id),
        user_id: UserId(user_id),
        email,
        image,
        is_admin: is_admin != 0,
        timestamp,
    })
}

#[async_trait::async_trait]
impl ChatStore for SqliteStore {
    // ───────────────────────────── Memberships ─────────────────────────────

    async fn count_memberships(&self, user_id: &UserId) -> Result<u64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_members WHERE user_id=?")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        Ok(count.max(0) as u64)
    }

    async fn create_membership(
        &self,
        p: &CreateChatMemberParams,
    ) -> Result<ChatMember, StoreError> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO chat_members(chat_id,user_id,email,image,is_admin,created_at)
             VALUES(?,?,?,?,?,?)
             ON CONFLICT(chat_id,user_id)
             DO UPDATE SET email=excluded.email,
                           image=excluded.image,
                           is_admin=excluded.is_admin,
                           created_at=excluded.created_at",
        )
        .bind(p.chat_id.to_string())
        .bind(p.user_id.as_str())
        .bind(&p.email)
        .bind(&p.image)
        .bind(p.is_admin as i64)
        .bind(now.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        // Round-trip through the stored precision
        let timestamp = DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        Ok(p.clone().into_member(timestamp))
    }

    async fn get_membership(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> Result<ChatMember, StoreError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM chat_members WHERE chat_id=? AND user_id=?",
            MEMBER_COLUMNS
        ))
        .bind(chat_id.to_string())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            None => Err(StoreError::NotFound),
            Some(row) => member_from_row(row),
        }
    }

    async fn list_memberships(&self, user_id: &UserId) -> Result<Vec<ChatMember>, StoreError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM chat_members WHERE user_id=? ORDER BY created_at DESC, chat_id",
            MEMBER_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(member_from_row).collect()
    }

    async fn list_chat_members(&self, chat_id: &ChatId) -> Result<Vec<ChatMember>, StoreError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM chat_members WHERE chat_id=? ORDER BY is_admin DESC, email",
            MEMBER_COLUMNS
        ))
        .bind(chat_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(member_from_row).collect()
    }
}
