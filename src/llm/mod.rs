// src/llm/mod.rs
// Generation client seam and its Gemini implementation

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::{GeminiBackend, GeminiConfig};

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Gemini credentials not configured (set GEMINI_API_KEY)")]
    NotConfigured,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("Gemini API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Gemini error: {0}")]
    Remote(String),

    #[error("response blocked: {0}")]
    Blocked(String),

    #[error("empty response from model")]
    EmptyResponse,
}

/// A hosted text-generation backend. One prompt in, one completion out.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model identifier sent with every call
    fn model(&self) -> &str;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Stand-in used when no credentials are configured
#[derive(Debug, Clone)]
pub struct UnconfiguredClient {
    model: String,
}

impl UnconfiguredClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }
}

#[async_trait]
impl GenerationClient for UnconfiguredClient {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}

/// Build the client selected by configuration
pub fn client_from_config(
    config: &GeminiConfig,
) -> Result<Arc<dyn GenerationClient>, GenerationError> {
    let client: Arc<dyn GenerationClient> = match config.backend {
        GeminiBackend::Unconfigured => Arc::new(UnconfiguredClient::new(config.model.clone())),
        _ => Arc::new(GeminiClient::new(config)?),
    };
    info!(provider = client.name(), model = client.model(), "Generation client ready");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiConfig;

    #[tokio::test]
    async fn test_unconfigured_client_always_fails() {
        let client = UnconfiguredClient::new("gemini-2.0-flash");
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, GenerationError::NotConfigured));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_client_from_config_selects_backend() {
        let unconfigured = client_from_config(&GeminiConfig::default()).unwrap();
        assert_eq!(unconfigured.name(), "unconfigured");

        let config = GeminiConfig {
            backend: GeminiBackend::AiStudio { api_key: "k".to_string() },
            ..GeminiConfig::default()
        };
        let gemini = client_from_config(&config).unwrap();
        assert_eq!(gemini.name(), "gemini");
        assert_eq!(gemini.model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_api_error_display_carries_status_and_body() {
        let err = GenerationError::Api {
            status: 429,
            body: "RESOURCE_EXHAUSTED".to_string(),
        };
        assert_eq!(err.to_string(), "Gemini API error: 429 - RESOURCE_EXHAUSTED");
    }
}
