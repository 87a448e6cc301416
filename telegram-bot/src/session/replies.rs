//! Reply texts and inline keyboards shown by the session controller.

use dbot_core::{InlineButton, InlineKeyboard};
use teloxide::utils::command::BotCommands;

use crate::config::{
    BotConfig, RequiredChannel, DEFAULT_DEVELOPER_URL, DEFAULT_REQUIRED_CHANNELS,
    DEFAULT_WELCOME_MESSAGE,
};
use crate::telegram::TelegramCommand;

pub const CALLBACK_CHECK_MEMBERSHIP: &str = "check_membership";
pub const CALLBACK_CHAT: &str = "chat_worm";

pub const TEXT_VERIFIED: &str = "✅ Verification Successful!\n\nWelcome to TBEH WORM AI!";
pub const TEXT_CHAT_ACTIVATED: &str = "🤖 Chat Mode Activated!\n\nYou can now ask me anything!";
pub const TEXT_CLEARED: &str = "✅ Conversation history cleared!";
pub const TEXT_VERIFY_FIRST: &str = "❌ Please use /start to verify first.";
pub const TEXT_START_FIRST: &str = "❌ Please use /start first.";

const AI_PREFIX: &str = "🤖 ";

/// Texts and keyboards that depend on configuration (channels, developer link, welcome).
#[derive(Debug, Clone)]
pub struct Replies {
    channels: Vec<RequiredChannel>,
    developer_url: String,
    welcome: String,
}

impl Default for Replies {
    fn default() -> Self {
        Self {
            channels: RequiredChannel::parse_list(DEFAULT_REQUIRED_CHANNELS).unwrap_or_default(),
            developer_url: DEFAULT_DEVELOPER_URL.to_string(),
            welcome: DEFAULT_WELCOME_MESSAGE.to_string(),
        }
    }
}

impl Replies {
    pub fn new(
        channels: Vec<RequiredChannel>,
        developer_url: impl Into<String>,
        welcome: impl Into<String>,
    ) -> Self {
        Self {
            channels,
            developer_url: developer_url.into(),
            welcome: welcome.into(),
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(
            config.required_channels.clone(),
            config.developer_url.clone(),
            config.welcome_message.clone(),
        )
    }

    pub fn join_prompt(&self) -> String {
        let handles = self
            .channels
            .iter()
            .map(RequiredChannel::handle)
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "🔐 Access Required\n\nTo use this bot, you need to join our channel:\n\n\
             📢 Required Channel:\n{}\n\nPlease join the channel to unlock AI features!",
            handles
        )
    }

    /// One join link per channel, then the self-reported confirmation button.
    pub fn join_keyboard(&self) -> InlineKeyboard {
        self.channels
            .iter()
            .fold(InlineKeyboard::new(), |keyboard, channel| {
                keyboard.with_button(InlineButton::url(
                    format!("📢 Join {}", channel.name),
                    channel.url.clone(),
                ))
            })
            .with_button(InlineButton::callback("✅ I've Joined", CALLBACK_CHECK_MEMBERSHIP))
    }

    pub fn menu_text(&self, first_name: &str) -> String {
        format!(
            "🎯 TBEH WORM AI\n\nHello {}! How can I assist you today?",
            first_name
        )
    }

    pub fn menu_keyboard(&self) -> InlineKeyboard {
        InlineKeyboard::new()
            .with_button(InlineButton::callback("🤖 Chat with WORM", CALLBACK_CHAT))
            .with_button(InlineButton::url("👨‍💻 Developer", self.developer_url.clone()))
    }

    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    pub fn help(&self) -> String {
        format!(
            "🤖 TBEH WORM AI - Help\n\n{}\n\nHow to use:\n1. Use /start\n2. Join channel\n\
             3. Click \"Chat with WORM\"\n4. Start chatting!",
            TelegramCommand::descriptions()
        )
    }

    pub fn ai_reply(&self, text: &str) -> String {
        format!("{}{}", AI_PREFIX, text)
    }
}
