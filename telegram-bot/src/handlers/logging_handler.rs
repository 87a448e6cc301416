//! Logs each inbound event in before() and the outcome in after(); never stops the chain.

use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Content longer than this is cut in log lines.
const LOG_PREVIEW_CHARS: usize = 100;

fn preview(content: &str) -> String {
    if content.chars().count() <= LOG_PREVIEW_CHARS {
        content.to_string()
    } else {
        let cut: String = content.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}…", cut)
    }
}

#[derive(Clone, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            kind = ?message.kind,
            message_content = %preview(&message.content),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        match response {
            HandlerResponse::Reply(text) => debug!(
                user_id = message.user.id,
                reply_len = text.chars().count(),
                reply = %preview(text),
                "Processed message"
            ),
            other => debug!(user_id = message.user.id, response = ?other, "Processed message"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_cuts_long_content_on_char_boundary() {
        assert_eq!(preview("short"), "short");
        let long = "é".repeat(150);
        let cut = preview(&long);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().count(), LOG_PREVIEW_CHARS + 1);
    }
}
