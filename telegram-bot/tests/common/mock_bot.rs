//! Mock implementation of [`telegram_bot::Bot`] for integration tests.
//!
//! Records every outbound call so tests can assert on texts, keyboards and edits without
//! hitting Telegram.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use telegram_bot::{Bot, Chat, DbotError, InlineKeyboard, Message, Result};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum BotCall {
    Send {
        chat_id: i64,
        text: String,
        keyboard: Option<InlineKeyboard>,
    },
    Reply {
        chat_id: i64,
        text: String,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        text: String,
    },
    Typing {
        chat_id: i64,
    },
}

impl BotCall {
    /// Text of a send, reply or edit; None for typing.
    pub fn text(&self) -> Option<&str> {
        match self {
            BotCall::Send { text, .. } | BotCall::Reply { text, .. } | BotCall::Edit { text, .. } => {
                Some(text)
            }
            BotCall::Typing { .. } => None,
        }
    }
}

#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<BotCall>>,
    /// Sends to these chats fail with a Bot error.
    unreachable_chats: HashSet<i64>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unreachable_chats(chats: impl IntoIterator<Item = i64>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            unreachable_chats: chats.into_iter().collect(),
        }
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn take_calls(&self) -> Vec<BotCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    /// Text of the last send/reply/edit.
    pub fn last_text(&self) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|c| c.text().map(str::to_string))
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_reachable(&self, chat: &Chat) -> Result<()> {
        if self.unreachable_chats.contains(&chat.id) {
            Err(DbotError::Bot(format!("Forbidden: bot was blocked by {}", chat.id)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.check_reachable(chat)?;
        self.record(BotCall::Send {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: None,
        });
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> Result<()> {
        self.check_reachable(chat)?;
        self.record(BotCall::Send {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: Some(keyboard.clone()),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.check_reachable(&message.chat)?;
        self.record(BotCall::Reply {
            chat_id: message.chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(BotCall::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.record(BotCall::Typing { chat_id: chat.id });
        Ok(())
    }
}
