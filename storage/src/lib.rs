//! Storage crate: users and conversation history in a single SQLite file.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord, TurnRecord
//! - [`repository`] – ConversationStore trait (never-failing boundary)
//! - [`conversation_repo`] – SqliteConversationStore (SQLite via sqlx)
//! - [`sqlite_pool`] – SqlitePoolManager

mod conversation_repo;
mod error;
mod models;
mod repository;
mod sqlite_pool;


pub use conversation_repo::SqliteConversationStore;
pub use error::StorageError;
pub use models::{TurnRecord, UserRecord};
pub use repository::{ConversationStore, DEFAULT_HISTORY_LIMIT};
pub use sqlite_pool::SqlitePoolManager;
