//! Integration tests for [`storage::SqliteConversationStore`] through the [`storage::ConversationStore`] trait.
//!
//! Each test uses its own on-disk SQLite file in a temp dir.

use prompt::{ChatMessage, MessageRole};
use storage::{ConversationStore, SqliteConversationStore, DEFAULT_HISTORY_LIMIT};
use tempfile::TempDir;

async fn open_store() -> (TempDir, SqliteConversationStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("conversations.db");
    let store = SqliteConversationStore::new(path.to_str().unwrap())
        .await
        .expect("Failed to create store");
    (dir, store)
}

/// **Test: Verification is false for unseen users, true after mark_verified, and stays true.**
///
/// **Setup:** Empty DB; user 42 upserted.
/// **Action:** is_verified before/after mark_verified, then mark_verified twice more.
/// **Expected:** false → true → true; list_verified_users returns [42].
#[tokio::test]
async fn test_verification_is_one_way_and_idempotent() {
    let (_dir, store) = open_store().await;

    assert!(!store.is_verified(42).await);
    assert!(store.upsert_user(42, Some("neo"), Some("Thomas"), None).await);
    assert!(!store.is_verified(42).await);

    assert!(store.mark_verified(42).await);
    assert!(store.is_verified(42).await);

    assert!(store.mark_verified(42).await);
    assert!(store.mark_verified(42).await);
    assert!(store.is_verified(42).await);
    assert_eq!(store.list_verified_users().await, vec![42]);
}

/// **Test: mark_verified on an absent user is a successful no-op.**
#[tokio::test]
async fn test_mark_verified_absent_user_is_noop() {
    let (_dir, store) = open_store().await;

    assert!(store.mark_verified(7).await);
    assert!(!store.is_verified(7).await);
    assert!(store.list_verified_users().await.is_empty());
}

/// **Test: Re-contact refreshes profile fields but keeps the verification flag and join time.**
#[tokio::test]
async fn test_upsert_keeps_verification_and_join_time() {
    let (_dir, store) = open_store().await;

    store.upsert_user(1, Some("old"), Some("Old"), None).await;
    store.mark_verified(1).await;
    let before = store.get_user(1).await.unwrap().unwrap();

    assert!(store.upsert_user(1, Some("new"), Some("New"), Some("Name")).await);

    let after = store.get_user(1).await.unwrap().unwrap();
    assert!(after.is_verified);
    assert_eq!(after.username.as_deref(), Some("new"));
    assert_eq!(after.last_name.as_deref(), Some("Name"));
    assert_eq!(after.joined_at, before.joined_at);
}

/// **Test: recent_history returns exactly the last N turns in insertion order.**
///
/// **Setup:** 15 turns alternating user/assistant.
/// **Action:** `recent_history(id, 10)`.
/// **Expected:** turns 5..15, oldest first.
#[tokio::test]
async fn test_recent_history_returns_last_n_chronologically() {
    let (_dir, store) = open_store().await;
    store.upsert_user(100, None, None, None).await;

    for i in 0..15 {
        let role = if i % 2 == 0 {
            MessageRole::User
        } else {
            MessageRole::Assistant
        };
        assert!(store.append_turn(100, role, &format!("turn {}", i)).await);
    }

    let history = store.recent_history(100, DEFAULT_HISTORY_LIMIT).await;

    assert_eq!(history.len(), 10);
    let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
    let expected: Vec<String> = (5..15).map(|i| format!("turn {}", i)).collect();
    assert_eq!(contents, expected);
    assert_eq!(history[0].role, MessageRole::Assistant);
    assert_eq!(history[9].role, MessageRole::User);
}

/// **Test: A limit larger than the history returns everything; limit 0 returns nothing.**
#[tokio::test]
async fn test_recent_history_limit_bounds() {
    let (_dir, store) = open_store().await;
    store.upsert_user(3, None, None, None).await;
    store.append_turn(3, MessageRole::User, "q").await;
    store.append_turn(3, MessageRole::Assistant, "a").await;

    assert_eq!(
        store.recent_history(3, 50).await,
        vec![ChatMessage::user("q"), ChatMessage::assistant("a")]
    );
    assert!(store.recent_history(3, 0).await.is_empty());
    assert!(store.recent_history(999, 10).await.is_empty());
}

/// **Test: clear_history empties one user's history and leaves other users untouched.**
#[tokio::test]
async fn test_clear_history_is_scoped_to_user() {
    let (_dir, store) = open_store().await;
    for user_id in [1, 2] {
        store.upsert_user(user_id, None, None, None).await;
        store.append_turn(user_id, MessageRole::User, "hello").await;
        store.append_turn(user_id, MessageRole::Assistant, "hi").await;
    }

    assert!(store.clear_history(1).await);

    assert!(store.recent_history(1, DEFAULT_HISTORY_LIMIT).await.is_empty());
    assert_eq!(store.recent_history(2, DEFAULT_HISTORY_LIMIT).await.len(), 2);
    assert!(store.clear_history(1).await);
}

/// **Test: A turn for a user that was never stored is rejected by the foreign key.**
#[tokio::test]
async fn test_append_turn_requires_existing_user() {
    let (_dir, store) = open_store().await;

    assert!(!store.append_turn(555, MessageRole::User, "orphan").await);
    assert!(store.recent_history(555, 10).await.is_empty());
}
