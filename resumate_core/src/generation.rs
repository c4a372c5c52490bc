//! Infallible text generation on top of an [`LLMProvider`].

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::util::preview;
use crate::{ChatMessage, LLMProvider};

/// Reply used in place of generated text when the provider fails.
pub const GENERATION_FAILED_NOTICE: &str =
    "⚠️ Sorry, there was an error generating the response. Please try again later.";

/// Prompt in, text out. Implementations never fail: provider errors are
/// logged and turned into a user-facing notice.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> String;
}

/// Adapts any [`LLMProvider`] into a [`TextGenerator`].
pub struct ProviderGenerator<P> {
    provider: P,
    model: String,
}

impl<P: LLMProvider> ProviderGenerator<P> {
    /// Use the provider's default model.
    pub fn new(provider: P) -> Self {
        let model = provider.get_default_model().to_string();
        Self { provider, model }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl<P: LLMProvider> TextGenerator for ProviderGenerator<P> {
    async fn complete(&self, prompt: &str) -> String {
        debug!("Sending prompt: {}", preview(prompt, 200));

        match self
            .provider
            .chat(&[ChatMessage::user(prompt)], &self.model)
            .await
        {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    info!(
                        "Generation finished: {} prompt + {} completion tokens",
                        usage.prompt_tokens, usage.completion_tokens
                    );
                }
                response.content
            }
            Err(e) => {
                error!("LLM provider error: {e:#}");
                GENERATION_FAILED_NOTICE.to_string()
            }
        }
    }
}
