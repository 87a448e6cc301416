//! Turn row: one message of a user's conversation with the assistant.

use chrono::{DateTime, Utc};
use prompt::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TurnRecord {
    pub id: i64,
    pub user_id: i64,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<TurnRecord> for ChatMessage {
    type Error = StorageError;

    fn try_from(record: TurnRecord) -> Result<Self, Self::Error> {
        let role = record
            .role
            .parse()
            .map_err(|e| StorageError::CorruptRow(format!("turn {}: {}", record.id, e)))?;
        Ok(ChatMessage {
            role,
            content: record.content,
        })
    }
}
