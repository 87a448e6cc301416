use anyhow::Result;
use dbot_core::init_tracing;
use tracing::{info, instrument};

use crate::broadcast::{broadcast, BroadcastReport};
use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::telegram::run_dispatcher;

/// Main entry: validate config, init logging, build components and the handler chain, then dispatch updates.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        history_limit = config.history_limit,
        channels = config.required_channels.len(),
        inference_endpoint = %config.inference.endpoint,
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    let handler_chain = build_handler_chain(&config, &components);

    info!("Bot started successfully");
    run_dispatcher(components.teloxide_bot.clone(), handler_chain).await
}

/// Sends `text` to every verified user and exits.
#[instrument(skip(config, text))]
pub async fn run_broadcast(config: BotConfig, text: &str) -> Result<BroadcastReport> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    let components = build_bot_components(&config).await?;
    Ok(broadcast(components.store.as_ref(), components.bot_adapter.as_ref(), text).await)
}
