use async_trait::async_trait;
use prompt::{ChatMessage, MessageRole};

/// Number of turns fed back to the model when no explicit limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Users and their conversation history.
///
/// Every method is a failure boundary: storage errors are logged by the implementation and turned
/// into `false` / empty results, never returned. Absence of a `false` is the only success signal.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Inserts the user or refreshes the profile fields of an existing one.
    /// Verification flag and join time of an existing user are kept.
    async fn upsert_user(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> bool;

    /// Sets the verification flag. No-op when already verified or when the user does not exist.
    async fn mark_verified(&self, user_id: i64) -> bool;

    /// False when the user does not exist or is not verified.
    async fn is_verified(&self, user_id: i64) -> bool;

    async fn list_verified_users(&self) -> Vec<i64>;

    /// Inserts one turn. Fails (false) when the user row does not exist.
    async fn append_turn(&self, user_id: i64, role: MessageRole, content: &str) -> bool;

    /// At most `limit` most recent turns, oldest first.
    async fn recent_history(&self, user_id: i64, limit: usize) -> Vec<ChatMessage>;

    /// Deletes every turn of the user; other users are untouched.
    async fn clear_history(&self, user_id: i64) -> bool;
}
