//! Component factory: builds the shared long-lived instances once at startup.

use anyhow::Result;
use dbot_core::Bot as CoreBot;
use handler_chain::HandlerChain;
use inference_client::{HttpInferenceClient, InferenceClient};
use std::sync::Arc;
use storage::{ConversationStore, SqliteConversationStore};
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::handlers::LoggingHandler;
use crate::session::{ChatModeRegistry, Replies, SessionController};
use crate::telegram::TelegramBotAdapter;

/// Shared dependencies of the handler chain and the CLI commands.
#[derive(Clone)]
pub struct BotComponents {
    pub store: Arc<dyn ConversationStore>,
    pub inference: Arc<dyn InferenceClient>,
    pub teloxide_bot: Bot,
    pub bot_adapter: Arc<dyn CoreBot>,
    pub chat_modes: ChatModeRegistry,
}

/// teloxide Bot pointed at TELEGRAM_API_URL when configured.
pub fn build_teloxide_bot(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token.clone());
    if let Some(ref url_str) = config.telegram_api_url {
        match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        }
    } else {
        bot
    }
}

#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let store = SqliteConversationStore::new(&config.database_url)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url,
                "Failed to initialize conversation storage"
            );
            anyhow::anyhow!("Failed to initialize conversation storage: {}", e)
        })?;

    let inference = HttpInferenceClient::new(config.inference.clone()).map_err(|e| {
        error!(error = %e, "Failed to build inference client");
        anyhow::anyhow!("Failed to build inference client: {}", e)
    })?;

    let teloxide_bot = build_teloxide_bot(config);
    let bot_adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    info!(database_url = %config.database_url, "Bot components ready");

    Ok(BotComponents {
        store: Arc::new(store),
        inference: Arc::new(inference),
        teloxide_bot,
        bot_adapter,
        chat_modes: ChatModeRegistry::new(),
    })
}

/// Builds the session controller from components and config.
pub fn build_session_controller(config: &BotConfig, components: &BotComponents) -> SessionController {
    SessionController::new(
        components.store.clone(),
        components.inference.clone(),
        components.bot_adapter.clone(),
        Replies::from_config(config),
    )
    .with_history_limit(config.history_limit)
    .with_chat_modes(components.chat_modes.clone())
}

/// Builds the handler chain (logging → session controller).
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler::new()))
        .add_handler(Arc::new(build_session_controller(config, components)))
}
