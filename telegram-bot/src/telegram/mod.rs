//! Telegram transport: command parsing, teloxide ↔ core adapters, the [`dbot_core::Bot`]
//! implementation and the update dispatcher.

mod adapters;
mod bot_adapter;
mod commands;
mod runner;

pub use adapters::{
    callback_event, chat_type, classify_text, TelegramCallbackWrapper, TelegramMessageWrapper,
    TelegramUserWrapper,
};
pub use bot_adapter::{inline_markup, split_message, TelegramBotAdapter, TELEGRAM_MESSAGE_LIMIT};
pub use commands::TelegramCommand;
pub use runner::{run_dispatcher, BotUsername};
