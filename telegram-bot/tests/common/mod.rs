//! Shared helpers for telegram-bot integration tests.

#![allow(dead_code)]

pub mod flaky_store;
pub mod mock_bot;
pub mod scripted_inference;

use chrono::Utc;
use std::sync::Arc;
use storage::SqliteConversationStore;
use telegram_bot::{Chat, Command, Message, MessageDirection, MessageKind, User};
use tempfile::TempDir;

/// Store on a fresh on-disk database; keep the TempDir alive for the test's duration.
pub async fn temp_store() -> (Arc<SqliteConversationStore>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bot.db");
    let store = SqliteConversationStore::new(path.to_str().unwrap())
        .await
        .unwrap();
    (Arc::new(store), dir)
}

pub fn user(id: i64, first_name: &str) -> User {
    User {
        id,
        username: Some(format!("{}_tg", first_name.to_lowercase())),
        first_name: Some(first_name.to_string()),
        last_name: None,
    }
}

fn event(user: &User, id: &str, content: &str, kind: MessageKind) -> Message {
    Message {
        id: id.to_string(),
        user: user.clone(),
        chat: Chat {
            id: user.id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        kind,
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

pub fn text(user: &User, content: &str) -> Message {
    event(user, "1", content, MessageKind::Text)
}

pub fn command(user: &User, command: Command) -> Message {
    event(
        user,
        "1",
        &format!("/{}", command.name()),
        MessageKind::Command(command),
    )
}

/// Button press on the keyboard message `message_id`.
pub fn callback(user: &User, data: &str, message_id: &str) -> Message {
    event(user, message_id, data, MessageKind::Callback)
}
