//! HTTP text generator with a rotating key pool

use super::error::OpenAiError;
use super::protocol::{build_request, error_message, map_status, parse_response};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, warn};
use transcrew_application::{GenerationError, TextGenerator};
use transcrew_domain::{GenerationParams, Prompt};

/// Connection settings for [`OpenAiTextGenerator`]
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub model: String,
    pub api_keys: Vec<String>,
    /// Named in the error when `api_keys` is empty
    pub api_key_env: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub max_tokens: u32,
}

/// [`TextGenerator`] over an OpenAI-compatible `/chat/completions` endpoint.
///
/// Each call takes the next key from the pool, round-robin. A single call is
/// a single HTTP request: no retries happen here.
pub struct OpenAiTextGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_keys: Vec<String>,
    next_key: AtomicUsize,
    max_tokens: u32,
}

impl OpenAiTextGenerator {
    pub fn new(settings: OpenAiSettings) -> Result<Self, OpenAiError> {
        if settings.api_keys.is_empty() {
            return Err(OpenAiError::NoApiKey {
                env: settings.api_key_env,
            });
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(OpenAiError::Client)?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                settings.base_url.trim_end_matches('/')
            ),
            model: settings.model,
            api_keys: settings.api_keys,
            next_key: AtomicUsize::new(0),
            max_tokens: settings.max_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn key_count(&self) -> usize {
        self.api_keys.len()
    }

    fn next_key(&self) -> &str {
        let index = self.next_key.fetch_add(1, Ordering::Relaxed) % self.api_keys.len();
        &self.api_keys[index]
    }
}

impl std::fmt::Debug for OpenAiTextGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiTextGenerator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("keys", &self.api_keys.len())
            .finish()
    }
}

fn map_transport_error(error: reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::Timeout
    } else if error.is_connect() {
        GenerationError::Connection(error.to_string())
    } else {
        GenerationError::Other(error.to_string())
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate(
        &self,
        prompt: &Prompt,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let request = build_request(&self.model, prompt, params, self.max_tokens);
        debug!(
            "POST {} (model {}, {} prompt chars)",
            self.endpoint,
            self.model,
            prompt.system.len() + prompt.user.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.next_key())
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!("Chat completion failed with HTTP {}: {}", status, message);
            return Err(map_status(status.as_u16(), message));
        }

        let content = parse_response(&body)?;
        debug!("Received {} chars", content.len());
        Ok(content)
    }
}
