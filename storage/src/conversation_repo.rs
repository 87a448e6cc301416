//! Conversation store backed by SQLite.
//!
//! Two tables: `users` (identity + verification flag) and `turns` (role/content history).
//! Each fallible `try_*` method maps to one statement on a pooled connection; the
//! [`ConversationStore`] impl wraps them, logging and degrading errors.

use crate::error::StorageError;
use crate::models::{TurnRecord, UserRecord};
use crate::repository::ConversationStore;
use crate::sqlite_pool::SqlitePoolManager;
use async_trait::async_trait;
use chrono::Utc;
use prompt::{ChatMessage, MessageRole};
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct SqliteConversationStore {
    pub(crate) pool_manager: SqlitePoolManager,
}

impl SqliteConversationStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub async fn new(database_path: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_path).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                username TEXT,
                first_name TEXT,
                last_name TEXT,
                is_verified INTEGER NOT NULL DEFAULT 0,
                joined_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS turns (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(user_id),
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_turns_user_created ON turns(user_id, created_at)",
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    pub async fn try_upsert_user(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, first_name, last_name, is_verified, joined_at)
            VALUES (?, ?, ?, ?, 0, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                username = excluded.username,
                first_name = excluded.first_name,
                last_name = excluded.last_name
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        debug!(user_id = user_id, "Upserted user");
        Ok(())
    }

    pub async fn try_mark_verified(&self, user_id: i64) -> Result<(), StorageError> {
        let result =
            sqlx::query("UPDATE users SET is_verified = 1 WHERE user_id = ? AND is_verified = 0")
                .bind(user_id)
                .execute(self.pool_manager.pool())
                .await?;

        if result.rows_affected() > 0 {
            info!(user_id = user_id, "User verified");
        }
        Ok(())
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, username, first_name, last_name, is_verified, joined_at FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(user)
    }

    pub async fn try_list_verified_users(&self) -> Result<Vec<i64>, StorageError> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT user_id FROM users WHERE is_verified = 1 ORDER BY user_id")
                .fetch_all(self.pool_manager.pool())
                .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    pub async fn try_append_turn(
        &self,
        user_id: i64,
        role: MessageRole,
        content: &str,
    ) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO turns (user_id, role, content, created_at) VALUES (?, ?, ?, ?)")
            .bind(user_id)
            .bind(role.as_str())
            .bind(content)
            .bind(Utc::now())
            .execute(self.pool_manager.pool())
            .await?;
        Ok(())
    }

    /// Fetches newest-first with LIMIT, then reverses so the result reads oldest-first.
    pub async fn try_recent_history(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, StorageError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut records = sqlx::query_as::<_, TurnRecord>(
            "SELECT id, user_id, role, content, created_at FROM turns WHERE user_id = ? ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;
        records.reverse();

        let mut history = Vec::with_capacity(records.len());
        for record in records {
            match ChatMessage::try_from(record) {
                Ok(message) => history.push(message),
                Err(e) => warn!(user_id = user_id, error = %e, "Skipping unreadable turn"),
            }
        }
        Ok(history)
    }

    pub async fn try_clear_history(&self, user_id: i64) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM turns WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;

        info!(
            user_id = user_id,
            deleted = result.rows_affected(),
            "Cleared conversation history"
        );
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ConversationStore for SqliteConversationStore {
    async fn upsert_user(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> bool {
        match self
            .try_upsert_user(user_id, username, first_name, last_name)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Error adding user");
                false
            }
        }
    }

    async fn mark_verified(&self, user_id: i64) -> bool {
        match self.try_mark_verified(user_id).await {
            Ok(()) => true,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Error verifying user");
                false
            }
        }
    }

    async fn is_verified(&self, user_id: i64) -> bool {
        match self.get_user(user_id).await {
            Ok(user) => user.map(|u| u.is_verified).unwrap_or(false),
            Err(e) => {
                error!(user_id = user_id, error = %e, "Error checking verification");
                false
            }
        }
    }

    async fn list_verified_users(&self) -> Vec<i64> {
        self.try_list_verified_users().await.unwrap_or_else(|e| {
            error!(error = %e, "Error listing verified users");
            Vec::new()
        })
    }

    async fn append_turn(&self, user_id: i64, role: MessageRole, content: &str) -> bool {
        match self.try_append_turn(user_id, role, content).await {
            Ok(()) => true,
            Err(e) => {
                error!(user_id = user_id, role = %role, error = %e, "Error adding turn");
                false
            }
        }
    }

    async fn recent_history(&self, user_id: i64, limit: usize) -> Vec<ChatMessage> {
        self.try_recent_history(user_id, limit)
            .await
            .unwrap_or_else(|e| {
                error!(user_id = user_id, error = %e, "Error getting history");
                Vec::new()
            })
    }

    async fn clear_history(&self, user_id: i64) -> bool {
        match self.try_clear_history(user_id).await {
            Ok(_) => true,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Error clearing history");
                false
            }
        }
    }
}
