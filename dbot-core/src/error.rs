//! Error types for the bot core.
//!
//! [`DbotError`] is the top-level error; [`HandlerError`] is used for inbound events the core cannot route.

use thiserror::Error;

/// Top-level error for dbot (bot transport, inbound conversion).
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Errors produced while turning a transport event into a core [`crate::Message`].
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Missing sender on inbound event")]
    NoSender,
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
