use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TagsConfig;
use crate::tags::TagError;

/// A language model that continues a prompt.
#[async_trait]
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TagError>;
}

/// Client for a locally served model exposing `/v1/completions`
/// (llama.cpp server, vLLM, text-generation-webui, ...).
pub struct LocalModelClient {
    client: Client,
    endpoint: String,
    model: String,
    max_new_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

impl LocalModelClient {
    pub fn new(model: String, config: &TagsConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model,
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl TextGenerator for LocalModelClient {
    async fn generate(&self, prompt: &str) -> Result<String, TagError> {
        let url = format!("{}/v1/completions", self.endpoint);
        debug!(%url, model = %self.model, "requesting completion");

        let request = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: self.max_new_tokens,
            temperature: self.temperature,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TagError::Status(status.as_u16(), body));
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or(TagError::EmptyCompletion)
    }
}
