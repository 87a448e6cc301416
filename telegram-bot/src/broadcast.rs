//! Sends one text to every verified user.

use dbot_core::{Bot, Chat};
use storage::ConversationStore;
use tracing::{info, instrument, warn};

/// Outcome of a broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub sent: usize,
    pub failed: usize,
}

/// Users are addressed through their private chat (chat id == user id). A failed send is
/// logged and counted; it does not stop the remaining deliveries.
#[instrument(skip(store, bot, text))]
pub async fn broadcast(store: &dyn ConversationStore, bot: &dyn Bot, text: &str) -> BroadcastReport {
    let recipients = store.list_verified_users().await;
    info!(recipients = recipients.len(), "Broadcast started");

    let mut report = BroadcastReport::default();
    for user_id in recipients {
        let chat = Chat {
            id: user_id,
            chat_type: "private".to_string(),
        };
        match bot.send_message(&chat, text).await {
            Ok(()) => report.sent += 1,
            Err(e) => {
                warn!(error = %e, user_id, "Broadcast delivery failed");
                report.failed += 1;
            }
        }
    }

    info!(sent = report.sent, failed = report.failed, "Broadcast finished");
    report
}
