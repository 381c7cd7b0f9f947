//! Text-generation API interaction.
//!
//! # Architecture
//!
//! - [`AskAsync`]: trait for single-turn prompt → text generation
//! - [`MessagesClient`]: implementation backed by the Anthropic Messages API
//!
//! Each call is attempted exactly once. Timeouts come from the shared
//! [`reqwest::Client`].

use crate::config::Config;
use crate::error::ServiceError;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Messages API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Trait for async single-turn text generation.
///
/// Implementors send one prompt and return the generated text. This is the
/// seam the synthesizer depends on, so tests can swap in a stub.
pub trait AskAsync {
    async fn ask(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Anthropic Messages endpoint.
///
/// Borrows the shared HTTP client and the run configuration; holds no state
/// of its own.
#[derive(Debug)]
pub struct MessagesClient<'a> {
    pub client: &'a Client,
    pub config: &'a Config,
}

impl<'a> MessagesClient<'a> {
    pub fn new(client: &'a Client, config: &'a Config) -> Self {
        Self { client, config }
    }
}

impl AskAsync for MessagesClient<'_> {
    #[instrument(level = "info", skip_all, fields(model = %self.config.model))]
    async fn ask(&self, prompt: &str) -> Result<String, ServiceError> {
        let t0 = Instant::now();
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.config.generation_api_url.clone())
            .header("x-api-key", &self.config.generation_api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Generation API returned an error status"
            );
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&text, 300),
            });
        }

        let raw = response.text().await?;
        let parsed: MessagesResponse = serde_json::from_str(&raw)?;
        let text = parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or(ServiceError::EmptyContent)?;

        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            chars = text.len(),
            "Generation succeeded"
        );
        Ok(text)
    }
}
