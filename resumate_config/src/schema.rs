use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_DIR_NAME: &str = "resumate";
const CONFIG_FILE_NAME: &str = "config.json";

const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
const ENV_PORT: &str = "PORT";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub interview: InterviewConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "GeminiConfig::default_model")]
    pub model: String,
    #[serde(default = "GeminiConfig::default_temperature")]
    pub temperature: f32,
    #[serde(default = "GeminiConfig::default_top_p")]
    pub top_p: f32,
    #[serde(default = "GeminiConfig::default_top_k")]
    pub top_k: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: Self::default_model(),
            temperature: Self::default_temperature(),
            top_p: Self::default_top_p(),
            top_k: Self::default_top_k(),
        }
    }
}

impl GeminiConfig {
    fn default_model() -> String {
        "gemini-2.0-flash".to_string()
    }

    const fn default_temperature() -> f32 {
        0.7
    }

    const fn default_top_p() -> f32 {
        0.9
    }

    const fn default_top_k() -> u32 {
        40
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    /// Maximum characters per outgoing message.
    #[serde(default = "DeliveryConfig::default_max_chunk_len")]
    pub max_chunk_len: usize,
    /// Pause between consecutive chunks of one reply.
    #[serde(default = "DeliveryConfig::default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_chunk_len: Self::default_max_chunk_len(),
            chunk_delay_ms: Self::default_chunk_delay_ms(),
        }
    }
}

impl DeliveryConfig {
    const fn default_max_chunk_len() -> usize {
        4000
    }

    const fn default_chunk_delay_ms() -> u64 {
        500
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct InterviewConfig {
    /// Questions requested from the model for a mock interview.
    #[serde(default = "InterviewConfig::default_question_count")]
    pub question_count: usize,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            question_count: Self::default_question_count(),
        }
    }
}

impl InterviewConfig {
    const fn default_question_count() -> usize {
        8
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory for temporary résumé downloads.
    #[serde(default = "StorageConfig::default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            download_dir: Self::default_download_dir(),
        }
    }
}

impl StorageConfig {
    fn default_download_dir() -> PathBuf {
        PathBuf::from("./downloads")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HealthConfig {
    #[serde(default = "HealthConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "HealthConfig::default_port")]
    pub port: u16,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            port: Self::default_port(),
        }
    }
}

impl HealthConfig {
    const fn default_enabled() -> bool {
        true
    }

    const fn default_port() -> u16 {
        3000
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load `~/resumate/config.json` (defaults when absent), apply `.env` and
    /// process environment overrides, then check required credentials.
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::load_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// [`Config::load`] without the credential check, for callers that
    /// still apply overrides of their own.
    pub fn load_unvalidated() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!(
                "No config file at {}, using defaults and environment",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override file values with environment variables found by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_TELEGRAM_TOKEN).filter(|v| !v.is_empty()) {
            self.telegram.token = token;
        }
        if let Some(key) = lookup(ENV_GEMINI_API_KEY).filter(|v| !v.is_empty()) {
            self.providers.gemini.api_key = key;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.health.port = port
                .parse()
                .with_context(|| format!("{ENV_PORT} must be a valid port number, got {port:?}"))?;
        }
        Ok(())
    }

    /// Both the bot token and the Gemini API key are required to start.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut missing = Vec::new();
        if self.telegram.token.is_empty() {
            missing.push(ENV_TELEGRAM_TOKEN);
        }
        if self.providers.gemini.api_key.is_empty() {
            missing.push(ENV_GEMINI_API_KEY);
        }
        if !missing.is_empty() {
            anyhow::bail!(
                "Missing required configuration: {}. Set them in the environment or in {}",
                missing.join(", "),
                CONFIG_FILE_NAME
            );
        }
        if self.delivery.max_chunk_len == 0 {
            anyhow::bail!("delivery.max_chunk_len must be greater than zero");
        }
        Ok(())
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here"
  },
  "providers": {
    "gemini": {
      "api_key": "your-gemini-api-key-here",
      "model": "gemini-2.0-flash",
      "temperature": 0.7,
      "top_p": 0.9,
      "top_k": 40
    }
  },
  "delivery": {
    "max_chunk_len": 4000,
    "chunk_delay_ms": 500
  },
  "interview": {
    "question_count": 8
  },
  "storage": {
    "download_dir": "./downloads"
  },
  "health": {
    "enabled": true,
    "port": 3000
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add your Telegram bot token and Gemini API key");
        println!("      (or export {ENV_TELEGRAM_TOKEN} and {ENV_GEMINI_API_KEY})");
        println!("   2. Run 'resumate run' to start the bot");
        println!();
        Ok(())
    }
}
