//! Bot configuration loaded from the environment (`.env` is read by the binary via dotenvy).

use anyhow::{Context, Result};
use inference_client::InferenceConfig;
use std::collections::BTreeMap;
use std::env;
use std::time::Duration;
use storage::DEFAULT_HISTORY_LIMIT;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "./bot_database.db";
pub const DEFAULT_LOG_FILE: &str = "logs/worm-bot.log";
pub const DEFAULT_REQUIRED_CHANNELS: &str = "TBEH=https://t.me/about_tbeh";
pub const DEFAULT_DEVELOPER_URL: &str = "https://t.me/tbeh_owner";
pub const DEFAULT_WELCOME_MESSAGE: &str = "🎉 Welcome to TBEH WORM AI!\n\n\
Tap \"Chat with WORM\" to start a conversation, or send /help to see what I can do.";

/// Problems with individual config values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BOT_TOKEN not set")]
    MissingToken,

    #[error("Malformed channel entry '{0}', expected name=url")]
    MalformedChannel(String),

    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// A channel the user is asked to join before verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredChannel {
    pub name: String,
    pub url: String,
}

impl RequiredChannel {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parses a comma-separated `name=url` list. Empty items are skipped.
    pub fn parse_list(raw: &str) -> std::result::Result<Vec<Self>, ConfigError> {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                let (name, url) = item
                    .split_once('=')
                    .ok_or_else(|| ConfigError::MalformedChannel(item.to_string()))?;
                let (name, url) = (name.trim(), url.trim());
                if name.is_empty() || url.is_empty() {
                    return Err(ConfigError::MalformedChannel(item.to_string()));
                }
                Ok(Self::new(name, url))
            })
            .collect()
    }

    /// Public handle shown in the join prompt: `@name` for t.me links, the URL otherwise.
    pub fn handle(&self) -> String {
        match self.url.strip_prefix("https://t.me/") {
            Some(rest) if !rest.is_empty() => format!("@{}", rest.trim_end_matches('/')),
            _ => self.url.clone(),
        }
    }
}

/// Everything the bot needs at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Optional Bot API base URL (e.g. a mock server in tests). `TELEGRAM_API_URL` or `TELOXIDE_API_URL`.
    pub telegram_api_url: Option<String>,
    /// SQLite file path for users and conversation turns.
    pub database_url: String,
    pub log_file: String,
    /// Number of past turns sent with each AI request.
    pub history_limit: usize,
    pub required_channels: Vec<RequiredChannel>,
    pub developer_url: String,
    pub welcome_message: String,
    pub inference: InferenceConfig,
}

impl BotConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| ConfigError::MissingToken)?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let history_limit = parse_number("HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?;
        let required_channels = RequiredChannel::parse_list(
            &env::var("REQUIRED_CHANNELS").unwrap_or_else(|_| DEFAULT_REQUIRED_CHANNELS.to_string()),
        )?;
        let developer_url =
            env::var("DEVELOPER_URL").unwrap_or_else(|_| DEFAULT_DEVELOPER_URL.to_string());
        let welcome_message =
            env::var("WELCOME_MESSAGE").unwrap_or_else(|_| DEFAULT_WELCOME_MESSAGE.to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            database_url,
            log_file,
            history_limit,
            required_channels,
            developer_url,
            welcome_message,
            inference: load_inference_config()?,
        })
    }

    /// Rejects values the bot cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if self.history_limit == 0 {
            anyhow::bail!("HISTORY_LIMIT must be greater than zero");
        }
        if self.inference.timeout.is_zero() {
            anyhow::bail!("INFERENCE_TIMEOUT_SECS must be greater than zero");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if reqwest::Url::parse(&self.inference.endpoint).is_err() {
            anyhow::bail!("INFERENCE_URL is not a valid URL: {}", self.inference.endpoint);
        }
        for channel in &self.required_channels {
            if reqwest::Url::parse(&channel.url).is_err() {
                anyhow::bail!(
                    "Channel '{}' has an invalid URL: {}",
                    channel.name,
                    channel.url
                );
            }
        }
        if reqwest::Url::parse(&self.developer_url).is_err() {
            anyhow::bail!("DEVELOPER_URL is not a valid URL: {}", self.developer_url);
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }.into()),
        Err(_) => Ok(default),
    }
}

fn parse_json_map(name: &str) -> Result<BTreeMap<String, String>> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
            .with_context(|| format!("{} must be a JSON object of string values", name)),
        _ => Ok(BTreeMap::new()),
    }
}

fn load_inference_config() -> Result<InferenceConfig> {
    let mut config = InferenceConfig::default();
    if let Ok(url) = env::var("INFERENCE_URL") {
        config.endpoint = url;
    }
    if let Ok(model_id) = env::var("INFERENCE_MODEL_ID") {
        config.model_id = model_id;
    }
    if let Ok(model_name) = env::var("INFERENCE_MODEL_NAME") {
        config.model_name = model_name;
    }
    let timeout_secs = parse_number("INFERENCE_TIMEOUT_SECS", config.timeout.as_secs())?;
    config.timeout = Duration::from_secs(timeout_secs);
    config.headers = parse_json_map("INFERENCE_HEADERS")?;
    config.cookies = parse_json_map("INFERENCE_COOKIES")?;
    Ok(config)
}
