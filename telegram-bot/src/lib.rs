//! # Telegram bot application
//!
//! Channel-gated AI chat bot. Wires handler-chain, storage and inference-client behind the
//! session controller, loads config from env and runs the teloxide dispatcher.

pub mod broadcast;
pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;
pub mod session;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

// Re-export core so binaries and tests need a single import path.
pub use dbot_core::{
    Bot, ButtonAction, Chat, Command, DbotError, Handler, HandlerResponse, InlineButton,
    InlineKeyboard, Message, MessageDirection, MessageKind, Result, User,
};
pub use handler_chain::HandlerChain;

pub use broadcast::{broadcast, BroadcastReport};
pub use components::{
    build_bot_components, build_handler_chain, build_session_controller, build_teloxide_bot,
    BotComponents,
};
pub use config::{BotConfig, ConfigError, RequiredChannel};
pub use handlers::LoggingHandler;
pub use runner::{run_bot, run_broadcast};
pub use session::{ChatModeRegistry, Replies, SessionController, SessionState};
pub use telegram::{run_dispatcher, TelegramBotAdapter, TelegramCommand, TELEGRAM_MESSAGE_LIMIT};
