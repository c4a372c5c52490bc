use crate::{Result, bot_commands, handler};
use resumate_conversation::ConversationEngine;
use std::{sync::Arc, time::Duration};
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Telegram front end of the résumé assistant.
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    /// Conversation state machine shared by all chats
    engine: Arc<ConversationEngine>,
}

impl TelegramBot {
    #[must_use]
    pub const fn new(bot: Bot, engine: Arc<ConversationEngine>) -> Self {
        Self { bot, engine }
    }

    /// Test connection to Telegram API with linear backoff retry.
    /// Starts at 2s, increases by 2s each attempt, max 10s delay.
    /// Retries indefinitely until connection succeeds.
    async fn test_connection(&self) {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(me) => {
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        me.user
                            .username
                            .unwrap_or_else(|| "no username".to_string()),
                        me.user.id
                    );
                    return;
                }
                Err(e) => {
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);
                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    if attempt == 1 {
                        warn!("This may be due to:");
                        warn!("  - Network connectivity issues");
                        warn!("  - Firewall blocking api.telegram.org");
                        warn!("  - Invalid bot token");
                    }

                    sleep(Duration::from_secs(delay_secs)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Run the bot until Ctrl+C.
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::{CallbackQuery, Message, Update};

        self.test_connection().await;

        self.bot.set_my_commands(bot_commands()).await?;
        info!("Registered bot commands");

        let schema = dptree::entry()
            .branch(Update::filter_message().endpoint({
                let engine = Arc::clone(&self.engine);
                move |msg: Message| {
                    let engine = Arc::clone(&engine);
                    async move {
                        if let Err(e) = handler::handle_message(engine, msg).await {
                            error!("Failed to handle message: {e}");
                        }
                        respond(())
                    }
                }
            }))
            .branch(Update::filter_callback_query().endpoint({
                let engine = Arc::clone(&self.engine);
                move |query: CallbackQuery| {
                    let engine = Arc::clone(&engine);
                    async move {
                        if let Err(e) = handler::handle_callback(engine, query).await {
                            error!("Failed to handle button press: {e}");
                        }
                        respond(())
                    }
                }
            }));

        Dispatcher::builder(self.bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
