use crate::command::CommandStrategy;
use crate::health;
use resumate_config::Config;
use resumate_conversation::{ConversationEngine, DocumentIngestor, PdfTextExtractor};
use resumate_core::{InMemorySessionStore, ProviderGenerator};
use resumate_providers::{GeminiProvider, GenerationSettings};
use resumate_telegram::{TelegramBot, TelegramTransport};
use std::sync::Arc;
use std::time::Duration;
use teloxide::Bot;
use tracing::{error, info};

/// Input for the run command.
pub struct RunInput {
    /// Optional bot token (overrides config)
    pub token: Option<String>,
}

/// Wires config, provider, engine and Telegram together and runs the bot.
pub struct RunStrategy;

fn build_engine(config: &Config, transport: &Arc<TelegramTransport>) -> ConversationEngine {
    let gemini = &config.providers.gemini;
    let provider = GeminiProvider::new(gemini.api_key.clone()).with_settings(GenerationSettings {
        temperature: gemini.temperature,
        top_p: gemini.top_p,
        top_k: gemini.top_k,
    });
    let generator = ProviderGenerator::new(provider).with_model(gemini.model.clone());
    info!("Using model {}", generator.model());

    let ingestor = DocumentIngestor::new(
        transport.clone(),
        Arc::new(PdfTextExtractor),
        config.storage.download_dir.clone(),
    );

    ConversationEngine::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(generator),
        transport.clone(),
        ingestor,
    )
    .with_delivery(
        config.delivery.max_chunk_len,
        Duration::from_millis(config.delivery.chunk_delay_ms),
    )
    .with_question_count(config.interview.question_count)
}

impl CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load_unvalidated()?;
        if let Some(token) = input.token {
            config.telegram.token = token;
        }
        config.validate()?;

        info!("Starting resume assistant...");

        let bot = Bot::new(config.telegram.token.clone());
        let transport = Arc::new(TelegramTransport::new(bot.clone()));
        let engine = Arc::new(build_engine(&config, &transport));

        if config.health.enabled {
            let port = config.health.port;
            tokio::spawn(async move {
                if let Err(e) = health::serve(port).await {
                    error!("Health check server stopped: {e}");
                }
            });
        }

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        TelegramBot::new(bot, engine).run().await?;

        Ok(())
    }
}
