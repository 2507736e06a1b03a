//! Configuration for the AI gateway.
//!
//! All settings come from environment variables so the binary can run with
//! nothing but a `.env` file. The API key is the only required value.

use crate::errors::{Error, Result};
use std::env;
use std::time::Duration;

/// Settings for the remote generative provider.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the provider API.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model used for short text generation (copy, chat, analysis).
    pub text_model: String,

    /// Model used for image editing.
    pub image_model: String,

    /// Model used for promotional video generation.
    pub video_model: String,

    /// Sampling temperature for chat replies.
    pub temperature: f32,

    /// Maximum tokens for chat replies.
    pub max_tokens: u32,

    /// Interval between video job status polls.
    pub poll_interval: Duration,

    /// Hard ceiling on total video polling time.
    pub poll_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativeapi.example.com/v1".to_string(),
            api_key: String::new(),
            text_model: "text-fast".to_string(),
            image_model: "image-edit".to_string(),
            video_model: "video-fast".to_string(),
            temperature: 0.7,
            max_tokens: 150,
            poll_interval: Duration::from_secs(5),
            poll_timeout: Duration::from_secs(300),
        }
    }
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `AI_API_KEY` - API key for authentication
    ///
    /// Optional (with defaults):
    /// - `AI_API_URL`, `AI_TEXT_MODEL`, `AI_IMAGE_MODEL`, `AI_VIDEO_MODEL`
    /// - `AI_TEMPERATURE`, `AI_MAX_TOKENS`
    /// - `AI_POLL_INTERVAL_SECS`, `AI_POLL_TIMEOUT_SECS`
    ///
    /// # Errors
    /// Returns `Error::Config` if `AI_API_KEY` is unset or a numeric
    /// override does not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_key = env::var("AI_API_KEY").map_err(|_| Error::Config {
            message: "AI_API_KEY environment variable is required".to_string(),
        })?;

        Ok(Self {
            api_url: env::var("AI_API_URL").unwrap_or(defaults.api_url),
            api_key,
            text_model: env::var("AI_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: env::var("AI_IMAGE_MODEL").unwrap_or(defaults.image_model),
            video_model: env::var("AI_VIDEO_MODEL").unwrap_or(defaults.video_model),
            temperature: parse_env("AI_TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_env("AI_MAX_TOKENS", defaults.max_tokens)?,
            poll_interval: Duration::from_secs(parse_env(
                "AI_POLL_INTERVAL_SECS",
                defaults.poll_interval.as_secs(),
            )?),
            poll_timeout: Duration::from_secs(parse_env(
                "AI_POLL_TIMEOUT_SECS",
                defaults.poll_timeout.as_secs(),
            )?),
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| Error::Config {
            message: format!("Invalid value for {name}: {raw}"),
        }),
        Err(_) => Ok(default),
    }
}
