//! OpenAI-compatible chat-completions client.

use crate::error::{Result, TranslatorError};
use crate::Translator;
use async_trait::async_trait;
use metriq_core::TranslatorConfig;
use reqwest::{header, Client};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Production translator backed by an OpenAI-compatible provider.
#[derive(Clone)]
pub struct OpenAiTranslator {
    http: Client,
    base_url: Url,
    api_key: Secret<String>,
    model: String,
    temperature: f32,
}

impl std::fmt::Debug for OpenAiTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiTranslator")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiTranslator {
    /// Builds the translator from explicit configuration. Fails fast on a
    /// missing key so the CLI can fall back to heuristic resolution.
    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(TranslatorError::Config(
                "missing translator API key".to_string(),
            ));
        }

        let base_url = Url::parse(&config.base_url)?;
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(TranslatorError::Http)?;

        Ok(Self {
            http,
            base_url,
            api_key: Secret::new(config.api_key.clone()),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn translate(&self, grounding: &str, prompt: &str) -> Result<String> {
        let url = self.base_url.join("v1/chat/completions")?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: grounding.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslatorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await?;
        let output = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(TranslatorError::EmptyResponse)?;

        debug!(chars = output.len(), "translator responded");
        Ok(output)
    }
}
