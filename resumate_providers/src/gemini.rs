use async_trait::async_trait;
use reqwest::Client;
use resumate_core::{ChatMessage, LLMProvider, LLMResponse, Usage};
use serde_json::{Value, json};
use tracing::info;

use crate::retry::RetryPolicy;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Sampling settings sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
        }
    }
}

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    settings: GenerationSettings,
    retry: RetryPolicy,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating GeminiProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            settings: GenerationSettings::default(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub const fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Helper method to send a single request
    async fn try_send(&self, model: &str, request: &Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(format!("{}/models/{model}:generateContent", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        parse_response(&response)
    }
}

/// Build a `generateContent` request body.
fn build_request(messages: &[ChatMessage], settings: GenerationSettings) -> Value {
    let contents: Vec<Value> = messages
        .iter()
        .map(|m| json!({ "role": m.role, "parts": [{ "text": m.content }] }))
        .collect();

    json!({
        "contents": contents,
        "safetySettings": [
            { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_ONLY_HIGH" },
            { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_ONLY_HIGH" },
        ],
        "generationConfig": {
            "temperature": settings.temperature,
            "topP": settings.top_p,
            "topK": settings.top_k,
        },
    })
}

/// Extract the first candidate's text and the token usage.
fn parse_response(response: &Value) -> anyhow::Result<LLMResponse> {
    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| {
            let reason = response["promptFeedback"]["blockReason"]
                .as_str()
                .unwrap_or("missing content");
            anyhow::anyhow!("Invalid response format: {reason}")
        })?;

    let content: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();

    let usage = response["usageMetadata"].as_object().map(|u| {
        let count = |key: &str| u32::try_from(u[key].as_u64().unwrap_or(0)).unwrap_or(0);
        Usage {
            prompt_tokens: count("promptTokenCount"),
            completion_tokens: count("candidatesTokenCount"),
            total_tokens: count("totalTokenCount"),
        }
    });

    Ok(LLMResponse { content, usage })
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
        let request = build_request(messages, self.settings);

        info!("Sending request to Gemini API: model={}", model);

        let response = self.retry.run(|| self.try_send(model, &request)).await?;

        info!("Received response from Gemini API");
        Ok(response)
    }

    fn get_default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_prompt_and_settings() {
        let request = build_request(
            &[ChatMessage::user("Generate 8 questions")],
            GenerationSettings::default(),
        );
        assert_eq!(request["contents"][0]["role"], "user");
        assert_eq!(
            request["contents"][0]["parts"][0]["text"],
            "Generate 8 questions"
        );
        assert_eq!(request["generationConfig"]["topK"], 40);
        assert_eq!(request["safetySettings"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn parses_candidate_text_and_usage() {
        let response = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "1. Why Rust?" }, { "text": "\n2. Why Go?" }] }
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 8, "totalTokenCount": 20 }
        });
        let parsed = parse_response(&response).unwrap();
        assert_eq!(parsed.content, "1. Why Rust?\n2. Why Go?");
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.total_tokens, 20);
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let response = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = parse_response(&response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }
}
