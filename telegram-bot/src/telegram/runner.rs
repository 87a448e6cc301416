//! Update dispatcher: converts teloxide messages and callback queries to core events and passes
//! them to the HandlerChain. Updates are distributed per chat, so a slow AI call only delays
//! its own chat.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
use teloxide::dptree;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Update};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use super::commands::TelegramCommand;

/// The bot's own username, used to accept `/command@username` in groups.
#[derive(Clone, Debug, Default)]
pub struct BotUsername(pub String);

/// Resolves the bot username, registers the command menu and dispatches updates until Ctrl-C.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    let username = match bot.get_me().await {
        Ok(me) => {
            let username = me.user.username.clone().unwrap_or_default();
            info!(username = %username, "Bot authenticated");
            username
        }
        Err(e) => {
            warn!(error = %e, "get_me failed; /command@username will not be recognised");
            String::new()
        }
    };

    if let Err(e) = bot.set_my_commands(TelegramCommand::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("Starting dispatcher with long polling");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain, BotUsername(username)])
        .default_handler(|update| async move {
            debug!(update = ?update, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}

async fn on_message(
    msg: teloxide::types::Message,
    chain: HandlerChain,
    username: BotUsername,
) -> ResponseResult<()> {
    let wrapper = TelegramMessageWrapper::new(&msg, &username.0);
    if wrapper.kind().is_none() {
        debug!(chat_id = msg.chat.id.0, "Skipping non-text message or unknown command");
        return Ok(());
    }
    let core_msg = match wrapper.to_core() {
        Ok(core_msg) => core_msg,
        Err(e) => {
            debug!(chat_id = msg.chat.id.0, error = %e, "Skipping message");
            return Ok(());
        }
    };

    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        kind = ?core_msg.kind,
        "step: processing message (handler chain started)"
    );
    if let Err(e) = chain.handle(&core_msg).await {
        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
    }
    Ok(())
}

async fn on_callback(
    bot: teloxide::Bot,
    query: CallbackQuery,
    chain: HandlerChain,
) -> ResponseResult<()> {
    // Acknowledge first so the client stops its spinner even if handling fails.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let core_msg = match TelegramCallbackWrapper(&query).to_core() {
        Ok(core_msg) => core_msg,
        Err(e) => {
            debug!(error = %e, "Skipping callback");
            return Ok(());
        }
    };
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        data = %core_msg.content,
        "step: processing callback (handler chain started)"
    );
    if let Err(e) = chain.handle(&core_msg).await {
        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
    }
    Ok(())
}
