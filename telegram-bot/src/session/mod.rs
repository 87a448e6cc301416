//! Session handling: the verification gate, menu and chat mode.
//!
//! Verification is persisted in the store; chat mode is volatile and lives in [`ChatModeRegistry`].

mod controller;
mod registry;
mod replies;

pub use controller::{SessionController, SessionState};
pub use registry::ChatModeRegistry;
pub use replies::{
    Replies, CALLBACK_CHAT, CALLBACK_CHECK_MEMBERSHIP, TEXT_CHAT_ACTIVATED, TEXT_CLEARED,
    TEXT_START_FIRST, TEXT_VERIFIED, TEXT_VERIFY_FIRST,
};
