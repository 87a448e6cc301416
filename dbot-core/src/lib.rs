//! # dbot-core
//!
//! Core types and traits for the chat bot: [`Bot`], [`Handler`], message, user and keyboard types,
//! and tracing initialization. Transport-agnostic; used by handler-chain and the telegram-bot crate.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot, ButtonAction, InlineButton, InlineKeyboard};
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Command, Handler, HandlerResponse, Message, MessageDirection, MessageKind,
    ToCoreMessage, ToCoreUser, User,
};
