use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sg_core::{ContentGenerator, Error, Result};
use std::fmt;
use tracing::debug;

use crate::{Config, DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL};

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 4000;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

/// Chat-completions client for OpenAI and API-compatible servers.
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("OpenAI API key is required".to_string()))?;

        let mut generator = Self::new(api_key);
        if let Some(base_url) = &config.base_url {
            generator = generator.with_base_url(base_url);
        }
        if let Some(model) = &config.chat_model {
            generator = generator.with_model(model);
        }
        Ok(generator)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

impl fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl ContentGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!("Requesting completion from {} ({})", self.base_url, self.model);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "completion request failed with {}: {}",
                status, body
            )));
        }

        let response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::External(anyhow!("Malformed completion response: {}", e)))?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| Error::Generation("model returned no content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_generate_posts_chat_request() {
        let server = MockServer::start_async().await;
        let completion = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("Authorization", "Bearer sk-test")
                    .json_body_partial(r#"{"model":"gpt-4-turbo-preview","temperature":0.7,"max_tokens":4000}"#)
                    .body_contains("You write articles")
                    .body_contains("Write about earbuds");
                then.status(200).json_body(json!({
                    "choices": [{ "message": { "role": "assistant", "content": "<h1>Earbuds</h1>" } }]
                }));
            })
            .await;

        let generator = OpenAiGenerator::new("sk-test").with_base_url(&server.base_url());
        let draft = generator
            .generate("You write articles", "Write about earbuds")
            .await
            .unwrap();

        completion.assert_async().await;
        assert_eq!(draft, "<h1>Earbuds</h1>");
    }

    #[tokio::test]
    async fn test_empty_choices_is_a_generation_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let generator = OpenAiGenerator::new("sk-test").with_base_url(&server.base_url());
        let result = generator.generate("system", "user").await;
        assert!(matches!(result, Err(Error::Generation(_))));
    }

    #[tokio::test]
    async fn test_error_status_is_a_generation_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401).body("invalid api key");
            })
            .await;

        let generator = OpenAiGenerator::new("bad").with_base_url(&server.base_url());
        let err = generator.generate("system", "user").await.unwrap_err();
        assert!(matches!(err, Error::Generation(ref message) if message.contains("invalid api key")));
    }

    #[tokio::test]
    async fn test_malformed_response_is_an_external_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).body("<html>proxy error</html>");
            })
            .await;

        let generator = OpenAiGenerator::new("sk-test").with_base_url(&server.base_url());
        let err = generator.generate("system", "user").await.unwrap_err();
        assert!(matches!(err, Error::External(_)));
        assert!(err.to_string().contains("Malformed completion response"));
    }

    #[test]
    fn test_from_config_applies_overrides() {
        let config = Config {
            api_key: Some("sk-test".to_string()),
            base_url: Some("http://localhost:8080/v1/".to_string()),
            chat_model: Some("local-model".to_string()),
            ..Default::default()
        };
        let generator = OpenAiGenerator::from_config(&config).unwrap();
        assert_eq!(generator.base_url, "http://localhost:8080/v1");
        assert_eq!(generator.model, "local-model");
        assert!(!format!("{:?}", generator).contains("sk-test"));
    }
}
