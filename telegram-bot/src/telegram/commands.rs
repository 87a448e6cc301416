use dbot_core::Command;
use teloxide::utils::command::BotCommands;

/// Slash commands registered with Telegram. Descriptions feed both `/help` and the client's command menu.
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Commands:")]
pub enum TelegramCommand {
    #[command(description = "Start bot")]
    Start,
    #[command(description = "Main menu")]
    Menu,
    #[command(description = "Clear history")]
    Clear,
    #[command(description = "This message")]
    Help,
}

impl From<TelegramCommand> for Command {
    fn from(command: TelegramCommand) -> Self {
        match command {
            TelegramCommand::Start => Command::Start,
            TelegramCommand::Menu => Command::Menu,
            TelegramCommand::Clear => Command::Clear,
            TelegramCommand::Help => Command::Help,
        }
    }
}
