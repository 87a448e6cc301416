//! Adapters from Telegram (teloxide) types to dbot_core types.

use dbot_core::{
    Chat, HandlerError, Message, MessageDirection, MessageKind, Result, ToCoreMessage, ToCoreUser,
    User,
};
use teloxide::types::CallbackQuery;
use teloxide::utils::command::BotCommands;

use super::commands::TelegramCommand;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

pub fn chat_type(chat: &teloxide::types::Chat) -> &'static str {
    if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else {
        "channel"
    }
}

/// Text → command or plain text. Only the first word is parsed, so deep-link payloads
/// (`/start ref`) still count as the command. Unknown commands yield `None`.
pub fn classify_text(text: &str, bot_username: &str) -> Option<MessageKind> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with('/') {
        return Some(MessageKind::Text);
    }
    let head = trimmed.split_whitespace().next().unwrap_or(trimmed);
    TelegramCommand::parse(head, bot_username)
        .ok()
        .map(|command| MessageKind::Command(command.into()))
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a> {
    message: &'a teloxide::types::Message,
    bot_username: &'a str,
}

impl<'a> TelegramMessageWrapper<'a> {
    pub fn new(message: &'a teloxide::types::Message, bot_username: &'a str) -> Self {
        Self {
            message,
            bot_username,
        }
    }

    /// `None` for non-text messages and commands the bot does not know; those are dropped.
    pub fn kind(&self) -> Option<MessageKind> {
        self.message
            .text()
            .and_then(|text| classify_text(text, self.bot_username))
    }
}

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    /// Channel posts and other sender-less messages cannot be attributed to a user.
    fn to_core(&self) -> Result<Message> {
        let from = self.message.from.as_ref().ok_or(HandlerError::NoSender)?;
        Ok(Message {
            id: self.message.id.to_string(),
            user: TelegramUserWrapper(from).to_core(),
            chat: Chat {
                id: self.message.chat.id.0,
                chat_type: chat_type(&self.message.chat).to_string(),
            },
            content: self.message.text().unwrap_or("").to_string(),
            kind: self.kind().unwrap_or(MessageKind::Text),
            direction: MessageDirection::Incoming,
            created_at: chrono::Utc::now(),
        })
    }
}

/// Builds the core event for a button press. `origin` is the chat and id of the message
/// carrying the keyboard; without it the user's private chat is assumed.
pub fn callback_event(
    from: &teloxide::types::User,
    origin: Option<(Chat, String)>,
    data: Option<&str>,
) -> Message {
    let user = TelegramUserWrapper(from).to_core();
    let (chat, id) = origin.unwrap_or_else(|| {
        (
            Chat {
                id: user.id,
                chat_type: "private".to_string(),
            },
            String::new(),
        )
    });
    Message {
        id,
        user,
        chat,
        content: data.unwrap_or("").to_string(),
        kind: MessageKind::Callback,
        direction: MessageDirection::Incoming,
        created_at: chrono::Utc::now(),
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`Message`].
pub struct TelegramCallbackWrapper<'a>(pub &'a CallbackQuery);

impl<'a> ToCoreMessage for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Result<Message> {
        let origin = self.0.message.as_ref().map(|m| {
            (
                Chat {
                    id: m.chat().id.0,
                    chat_type: chat_type(m.chat()).to_string(),
                },
                m.id().to_string(),
            )
        });
        Ok(callback_event(&self.0.from, origin, self.0.data.as_deref()))
    }
}
