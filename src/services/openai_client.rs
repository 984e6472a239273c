use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use super::backend::{Completion, ItineraryBackend};
use super::prompt::SYSTEM_PROMPT;
use crate::{
    config::PlannerConfig,
    error::{PlannerError, Result},
    types::outcome::TokenUsage,
};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";

/// Client for an OpenAI-compatible chat completion endpoint.
///
/// Sends exactly one request per prompt; failures are reported, never retried.
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
    timeout: Duration,
    http: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(8000),
            timeout: Duration::from_secs(60),
            http: reqwest::Client::new(),
        }
    }

    /// Build a client from loaded configuration; requires an API key.
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            PlannerError::Config(
                "OPENAI_API_KEY environment variable must be set to call the AI service"
                    .to_string(),
            )
        })?;

        Ok(Self::new(api_key)
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone())
            .with_max_tokens(config.max_tokens)
            .with_timeout(config.timeout))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let request_url = build_chat_url(&self.base_url);

        let response = self
            .http
            .post(&request_url)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", "trip-planner-rs")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    PlannerError::Timeout(format!("AI request timed out: {err}"))
                } else {
                    PlannerError::Http(format!("HTTP request failed: {err}"))
                }
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let response_text = response
            .text()
            .await
            .map_err(|err| PlannerError::Http(format!("Failed to read response: {err}")))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(PlannerError::RateLimit {
                retry_after: retry_after.max(1),
            });
        }

        let response_json: Option<Value> = serde_json::from_str(&response_text).ok();

        if !status.is_success() {
            let api_message = response_json
                .as_ref()
                .and_then(|json| json.get("error"))
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or(response_text);

            return Err(PlannerError::Api(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        let response_json = response_json.ok_or_else(|| {
            PlannerError::Api("AI service returned a non-JSON envelope".to_string())
        })?;

        if let Some(error) = response_json.get("error") {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(PlannerError::Api(format!("API error: {}", error_message)));
        }

        Ok(response_json)
    }
}

#[async_trait]
impl ItineraryBackend for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<Completion> {
        let body = ChatCompletionRequest::new(
            self.model.clone(),
            vec![
                json!({ "role": "system", "content": SYSTEM_PROMPT }),
                json!({ "role": "user", "content": prompt }),
            ],
        )
        .with_max_tokens(self.max_tokens)
        .with_response_format(json!({ "type": "json_object" }))
        .into_value();

        debug!(target: "trip_planner::client", model = %self.model, "sending itinerary prompt");
        let response = self.chat_completion(&body).await?;
        extract_completion(&response)
    }
}

/// Pull the first choice's text and the token usage out of a completion envelope.
pub(crate) fn extract_completion(response: &Value) -> Result<Completion> {
    let first_choice = response
        .get("choices")
        .and_then(|value| value.as_array())
        .and_then(|choices| choices.first())
        .ok_or_else(|| {
            PlannerError::Api("Completion response contained no choices".to_string())
        })?;

    let text = first_choice
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .unwrap_or_default()
        .to_string();

    let usage = response.get("usage").and_then(|usage| {
        Some(TokenUsage {
            prompt_tokens: u32::try_from(usage.get("prompt_tokens")?.as_u64()?).ok()?,
            completion_tokens: u32::try_from(usage.get("completion_tokens")?.as_u64()?).ok()?,
            total_tokens: u32::try_from(usage.get("total_tokens")?.as_u64()?).ok()?,
        })
    });

    Ok(Completion { text, usage })
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    max_tokens: Option<u32>,
    response_format: Option<Value>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            response_format: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_response_format(mut self, response_format: Value) -> Self {
        self.response_format = Some(response_format);
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(response_format) = self.response_format {
            body["response_format"] = response_format;
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_chat_url() {
        assert_eq!(
            build_chat_url("https://openrouter.ai/api/v1/"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(
            build_chat_url("http://localhost:8080/v1/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body() {
        let body = ChatCompletionRequest::new("m", vec![json!({"role": "user", "content": "hi"})])
            .with_max_tokens(Some(10))
            .with_response_format(json!({"type": "json_object"}))
            .into_value();
        assert_eq!(body["model"], "m");
        assert_eq!(body["max_tokens"], 10);
        assert_eq!(body["response_format"]["type"], "json_object");

        let bare = ChatCompletionRequest::new("m", Vec::new()).into_value();
        assert!(bare.get("max_tokens").is_none());
    }

    #[test]
    fn test_extract_completion() {
        let envelope = json!({
            "choices": [{ "message": { "role": "assistant", "content": "```json\n{}\n```" } }],
            "usage": { "prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 12 }
        });
        let completion = extract_completion(&envelope).unwrap();
        assert_eq!(completion.text, "```json\n{}\n```");
        assert_eq!(completion.usage.unwrap().total_tokens, 12);

        assert!(extract_completion(&json!({ "choices": [] })).is_err());

        let oversized = json!({
            "choices": [{ "message": { "content": "{}" } }],
            "usage": { "prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 4_294_967_296u64 }
        });
        assert!(extract_completion(&oversized).unwrap().usage.is_none());
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = PlannerConfig::default();
        assert!(matches!(
            OpenAIClient::from_config(&config),
            Err(PlannerError::Config(_))
        ));

        config.api_key = Some("sk-test".into());
        config.model = "openai/gpt-4.1-mini".into();
        let client = OpenAIClient::from_config(&config).unwrap();
        assert_eq!(client.model(), "openai/gpt-4.1-mini");
    }
}
