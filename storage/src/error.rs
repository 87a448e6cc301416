//! Storage error types.
//!
//! Only fallible internals and `SqliteConversationStore::new` return these; the
//! [`crate::ConversationStore`] boundary logs them and degrades to safe defaults.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}
