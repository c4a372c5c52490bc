use resumate_conversation::Command;
use teloxide::types::BotCommand;

const DESCRIPTIONS: [(Command, &str); 3] = [
    (Command::Start, "Show main menu"),
    (Command::Help, "Show help guide"),
    (Command::EndInterview, "Stop mock interview"),
];

/// Commands registered with Telegram for the client-side command menu.
#[must_use]
pub fn bot_commands() -> Vec<BotCommand> {
    DESCRIPTIONS
        .iter()
        .map(|(command, description)| BotCommand::new(command.name(), *description))
        .collect()
}
