use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-user chat-mode flags. In memory only: a restart drops every user back to the menu.
#[derive(Clone, Default)]
pub struct ChatModeRegistry {
    active: Arc<RwLock<HashSet<i64>>>,
}

impl ChatModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn activate(&self, user_id: i64) {
        self.active.write().await.insert(user_id);
    }

    /// Returns true if the user was in chat mode.
    pub async fn deactivate(&self, user_id: i64) -> bool {
        self.active.write().await.remove(&user_id)
    }

    pub async fn is_active(&self, user_id: i64) -> bool {
        self.active.read().await.contains(&user_id)
    }
}
