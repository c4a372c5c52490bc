use resumate_config::Config;

/// Writes the configuration template to `~/resumate/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        Config::create_config()?;
        println!(
            "Created {}. Fill in the bot token and Gemini API key, or set TELEGRAM_BOT_TOKEN and GEMINI_API_KEY.",
            Config::config_path()?.display()
        );
        Ok(())
    }
}
