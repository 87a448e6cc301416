//! ConversationStore wrapper that reports failures on demand and delegates everything else.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use prompt::{ChatMessage, MessageRole};
use storage::ConversationStore;

pub struct FlakyStore {
    inner: Arc<dyn ConversationStore>,
    failing_appends: AtomicUsize,
    fail_verification: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: Arc<dyn ConversationStore>) -> Self {
        Self {
            inner,
            failing_appends: AtomicUsize::new(0),
            fail_verification: AtomicBool::new(false),
        }
    }

    /// The next `count` calls to `append_turn` fail without touching the inner store.
    pub fn fail_next_appends(&self, count: usize) {
        self.failing_appends.store(count, Ordering::SeqCst);
    }

    /// `mark_verified` fails without touching the inner store.
    pub fn fail_verification(&self) {
        self.fail_verification.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConversationStore for FlakyStore {
    async fn upsert_user(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> bool {
        self.inner
            .upsert_user(user_id, username, first_name, last_name)
            .await
    }

    async fn mark_verified(&self, user_id: i64) -> bool {
        if self.fail_verification.load(Ordering::SeqCst) {
            return false;
        }
        self.inner.mark_verified(user_id).await
    }

    async fn is_verified(&self, user_id: i64) -> bool {
        self.inner.is_verified(user_id).await
    }

    async fn list_verified_users(&self) -> Vec<i64> {
        self.inner.list_verified_users().await
    }

    async fn append_turn(&self, user_id: i64, role: MessageRole, content: &str) -> bool {
        let pending = self
            .failing_appends
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if pending.is_ok() {
            return false;
        }
        self.inner.append_turn(user_id, role, content).await
    }

    async fn recent_history(&self, user_id: i64, limit: usize) -> Vec<ChatMessage> {
        self.inner.recent_history(user_id, limit).await
    }

    async fn clear_history(&self, user_id: i64) -> bool {
        self.inner.clear_history(user_id).await
    }
}
