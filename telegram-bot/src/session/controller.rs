//! Session controller: routes each inbound event by the user's session state.

use async_trait::async_trait;
use dbot_core::{Bot, Command, Handler, HandlerResponse, Message, MessageKind, Result, User};
use inference_client::InferenceClient;
use prompt::MessageRole;
use std::sync::Arc;
use storage::{ConversationStore, DEFAULT_HISTORY_LIMIT};
use tracing::{debug, info, instrument, warn};

use super::registry::ChatModeRegistry;
use super::replies::{
    Replies, CALLBACK_CHAT, CALLBACK_CHECK_MEMBERSHIP, TEXT_CHAT_ACTIVATED, TEXT_CLEARED,
    TEXT_START_FIRST, TEXT_VERIFIED, TEXT_VERIFY_FIRST,
};

/// Where a user stands: derived from the persisted verification flag and the volatile chat flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unverified,
    VerifiedMenu,
    VerifiedChat,
}

/// Terminal handler of the chain. Sends every reply itself and returns it as
/// [`HandlerResponse::Reply`] so earlier handlers can observe it in `after`.
pub struct SessionController {
    store: Arc<dyn ConversationStore>,
    inference: Arc<dyn InferenceClient>,
    bot: Arc<dyn Bot>,
    chat_modes: ChatModeRegistry,
    replies: Replies,
    history_limit: usize,
}

impl SessionController {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        inference: Arc<dyn InferenceClient>,
        bot: Arc<dyn Bot>,
        replies: Replies,
    ) -> Self {
        Self {
            store,
            inference,
            bot,
            chat_modes: ChatModeRegistry::new(),
            replies,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Shares an existing registry (e.g. one built by the component factory).
    pub fn with_chat_modes(mut self, chat_modes: ChatModeRegistry) -> Self {
        self.chat_modes = chat_modes;
        self
    }

    pub fn chat_modes(&self) -> &ChatModeRegistry {
        &self.chat_modes
    }

    pub async fn state(&self, user_id: i64) -> SessionState {
        if !self.store.is_verified(user_id).await {
            SessionState::Unverified
        } else if self.chat_modes.is_active(user_id).await {
            SessionState::VerifiedChat
        } else {
            SessionState::VerifiedMenu
        }
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn show_menu(&self, message: &Message) -> Result<HandlerResponse> {
        let text = self.replies.menu_text(message.user.display_name());
        self.bot
            .send_with_keyboard(&message.chat, &text, &self.replies.menu_keyboard())
            .await?;
        Ok(HandlerResponse::Reply(text))
    }

    /// Edits the keyboard message a callback came from. Failures are logged only, so the
    /// follow-up message still goes out.
    async fn edit_origin(&self, message: &Message, text: &str) {
        if let Err(e) = self.bot.edit_message(&message.chat, &message.id, text).await {
            warn!(
                error = %e,
                user_id = message.user.id,
                message_id = %message.id,
                "Failed to edit callback message"
            );
        }
    }

    async fn register(&self, user: &User) {
        let stored = self
            .store
            .upsert_user(
                user.id,
                user.username.as_deref(),
                user.first_name.as_deref(),
                user.last_name.as_deref(),
            )
            .await;
        if !stored {
            warn!(user_id = user.id, "User profile not stored");
        }
    }

    async fn on_start(&self, message: &Message) -> Result<HandlerResponse> {
        let user = &message.user;
        info!(user_id = user.id, "Start command");
        self.register(user).await;

        if self.store.is_verified(user.id).await {
            self.chat_modes.deactivate(user.id).await;
            return self.show_menu(message).await;
        }

        let text = self.replies.join_prompt();
        self.bot
            .send_with_keyboard(&message.chat, &text, &self.replies.join_keyboard())
            .await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn on_command(&self, message: &Message, command: Command) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        if command != Command::Start && !self.store.is_verified(user_id).await {
            debug!(user_id, command = command.name(), "Command rejected for unverified user");
            return self.reply(message, TEXT_START_FIRST.to_string()).await;
        }

        match command {
            Command::Start => self.on_start(message).await,
            Command::Menu => {
                self.chat_modes.deactivate(user_id).await;
                self.show_menu(message).await
            }
            Command::Clear => {
                if !self.store.clear_history(user_id).await {
                    warn!(user_id, "History clear reported failure");
                }
                info!(user_id, "Conversation history cleared");
                self.reply(message, TEXT_CLEARED.to_string()).await
            }
            Command::Help => self.reply(message, self.replies.help()).await,
        }
    }

    async fn on_callback(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        match message.content.as_str() {
            CALLBACK_CHECK_MEMBERSHIP => {
                // The button may be pressed on a keyboard left over from before a reset.
                self.register(&message.user).await;
                self.store.mark_verified(user_id).await;
                if !self.store.is_verified(user_id).await {
                    warn!(user_id, "Verification not recorded");
                    self.bot.send_message(&message.chat, TEXT_START_FIRST).await?;
                    return Ok(HandlerResponse::Reply(TEXT_START_FIRST.to_string()));
                }
                info!(user_id, "User verified");
                self.edit_origin(message, TEXT_VERIFIED).await;
                let welcome = self.replies.welcome().to_string();
                self.bot
                    .send_with_keyboard(&message.chat, &welcome, &self.replies.menu_keyboard())
                    .await?;
                Ok(HandlerResponse::Reply(welcome))
            }
            CALLBACK_CHAT => {
                if !self.store.is_verified(user_id).await {
                    self.bot.send_message(&message.chat, TEXT_START_FIRST).await?;
                    return Ok(HandlerResponse::Reply(TEXT_START_FIRST.to_string()));
                }
                self.chat_modes.activate(user_id).await;
                info!(user_id, "Chat mode activated");
                self.edit_origin(message, TEXT_CHAT_ACTIVATED).await;
                Ok(HandlerResponse::Reply(TEXT_CHAT_ACTIVATED.to_string()))
            }
            other => {
                debug!(user_id, data = %other, "Ignoring unknown callback");
                Ok(HandlerResponse::Stop)
            }
        }
    }

    async fn on_text(&self, message: &Message) -> Result<HandlerResponse> {
        match self.state(message.user.id).await {
            SessionState::Unverified => self.reply(message, TEXT_VERIFY_FIRST.to_string()).await,
            SessionState::VerifiedMenu => self.show_menu(message).await,
            SessionState::VerifiedChat => self.chat(message).await,
        }
    }

    /// One AI exchange. Turns are stored only when the model produced an answer, so
    /// apologies never end up in the history sent with later requests.
    async fn chat(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        if let Err(e) = self.bot.send_typing(&message.chat).await {
            warn!(error = %e, user_id, "Failed to send typing action");
        }

        let history = self.store.recent_history(user_id, self.history_limit).await;
        let completion = self.inference.complete(&history, &message.content).await;

        if completion.is_answer() {
            self.record_exchange(user_id, &message.content, completion.text())
                .await;
        } else {
            warn!(user_id, completion = ?completion, "AI exchange fell back");
        }

        info!(
            user_id,
            history_len = history.len(),
            answered = completion.is_answer(),
            "AI exchange finished"
        );
        self.reply(message, self.replies.ai_reply(completion.text())).await
    }

    /// Stores question then answer. The answer is written only after the question, so history
    /// never holds an assistant turn without the user turn before it.
    async fn record_exchange(&self, user_id: i64, question: &str, answer: &str) {
        if !self
            .store
            .append_turn(user_id, MessageRole::User, question)
            .await
        {
            warn!(user_id, "User turn not stored; dropping the exchange");
            return;
        }
        if !self
            .store
            .append_turn(user_id, MessageRole::Assistant, answer)
            .await
        {
            warn!(user_id, "Assistant turn not stored");
        }
    }
}

#[async_trait]
impl Handler for SessionController {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match &message.kind {
            MessageKind::Command(command) => self.on_command(message, *command).await,
            MessageKind::Callback => self.on_callback(message).await,
            MessageKind::Text => self.on_text(message).await,
        }
    }
}
