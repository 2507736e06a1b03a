//! Client for the remote generative provider: mascot chat, marketing copy,
//! product image editing, and promotional video jobs.
//!
//! Text and image operations never surface remote failures; they degrade to
//! user-safe fallback values. Video jobs have no sensible partial result, so
//! their failures and timeouts are real errors.

mod api_types;
pub mod chat;
pub mod media;

pub use chat::ChatContext;
pub use media::VideoJobState;

use crate::config::gateway::GatewayConfig;
use crate::errors::Result;
use api_types::{GenerateRequest, GenerateResponse};

/// Handle on the remote generative provider.
#[derive(Debug, Clone)]
pub struct AiGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl AiGateway {
    /// Creates a gateway with explicit configuration.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Creates a gateway configured from environment variables.
    ///
    /// # Errors
    /// Returns `Error::Config` when `AI_API_KEY` is missing.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GatewayConfig::from_env()?))
    }

    pub(crate) fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Sends one generation request and returns the parsed response.
    pub(crate) async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/models/{}:generate", self.config.api_url, request.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
