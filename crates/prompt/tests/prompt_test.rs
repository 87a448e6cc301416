//! Tests for turn types and prompt assembly.

use prompt::{with_user_message, ChatMessage, MessageRole, UnknownRole};

/// **Test: Roles round-trip through their stored string form; unknown strings are rejected.**
#[test]
fn role_parses_stored_values() {
    assert_eq!("user".parse::<MessageRole>(), Ok(MessageRole::User));
    assert_eq!("assistant".parse::<MessageRole>(), Ok(MessageRole::Assistant));
    assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    assert_eq!(
        "system".parse::<MessageRole>(),
        Err(UnknownRole("system".to_string()))
    );
}

/// **Test: A turn serializes to the `{role, content}` wire shape with a lowercase role.**
#[test]
fn chat_message_wire_shape() {
    let json = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
    assert_eq!(json, serde_json::json!({"role": "assistant", "content": "hi"}));
}

/// **Test: with_user_message appends the new user turn last and leaves history untouched.**
#[test]
fn with_user_message_appends_last() {
    let history = vec![ChatMessage::user("q1"), ChatMessage::assistant("a1")];

    let prompt = with_user_message(&history, "q2");

    assert_eq!(history.len(), 2);
    assert_eq!(prompt.len(), 3);
    assert_eq!(prompt[2], ChatMessage::user("q2"));
    assert_eq!(prompt[..2], history[..]);
}
