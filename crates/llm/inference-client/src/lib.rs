//! # Inference client
//!
//! Turns a conversation (history + new user message) into one assistant reply from the hosted
//! inference endpoint. Never fails towards the caller: every transport or parsing problem becomes a
//! [`Completion::Fallback`] whose [`Completion::text`] is a user-facing apology.
//!
//! - [`request`] builds the JSON payload with fresh per-call ids.
//! - [`client`] sends it with a bounded timeout and classifies transport failures.
//! - [`stream`] parses the newline-delimited response body, with a sandboxed lenient fallback
//!   for near-JSON lines.

use async_trait::async_trait;
use prompt::ChatMessage;

mod client;
mod completion;
mod config;
mod error;
mod lenient;
pub mod request;
pub mod stream;

pub use client::{HttpInferenceClient, RawResponse};
pub use completion::{
    Completion, FailureKind, MSG_BAD_STATUS, MSG_CONNECTION, MSG_EMPTY, MSG_TIMEOUT,
    MSG_UNEXPECTED,
};
pub use config::{
    InferenceConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL_ID, DEFAULT_MODEL_NAME, DEFAULT_TIMEOUT_SECS,
};
pub use error::TransportError;
pub use request::{build_request, InferenceRequest, RequestIds};
pub use stream::{collect_fragments, parse_stream};

/// Produces one assistant reply for a conversation. Implementations must not panic or error;
/// failures are reported through [`Completion::Fallback`].
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// `history` is oldest-first and does not contain `message`.
    async fn complete(&self, history: &[ChatMessage], message: &str) -> Completion;
}

/// Masks a secret (cookie, bearer value) for safe logging: first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of it.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}
