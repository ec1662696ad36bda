//! Gemini provider over the `generateContent` REST API
//!
//! Supports both Google AI Studio (API key) and Vertex AI (bearer token).
//! Single-shot: one request per prompt, no streaming, no tools, no retries.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;
use url::Url;

use super::{GenerationClient, GenerationError};
use crate::config::{GeminiBackend, GeminiConfig};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
enum Auth {
    ApiKey(String),
    Bearer(String),
}

pub struct GeminiClient {
    http: HttpClient,
    endpoint: Url,
    auth: Auth,
    model: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, GenerationError> {
        let (endpoint, auth) = match &config.backend {
            GeminiBackend::AiStudio { api_key } => (
                ai_studio_endpoint(&config.base_url, &config.model)?,
                Auth::ApiKey(api_key.clone()),
            ),
            GeminiBackend::Vertex {
                project_id,
                location,
                access_token,
            } => (
                vertex_endpoint(project_id, location, &config.model)?,
                Auth::Bearer(access_token.clone()),
            ),
            GeminiBackend::Unconfigured => return Err(GenerationError::NotConfigured),
        };

        let http = HttpClient::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            endpoint,
            auth,
            model: config.model.clone(),
            timeout_secs: config.timeout.as_secs(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.timeout_secs)
        } else {
            GenerationError::Http(err)
        }
    }
}

fn ai_studio_endpoint(base_url: &Url, model: &str) -> Result<Url, GenerationError> {
    // Without a trailing slash, join would replace the last path segment
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("v1beta/models/{}:generateContent", model))
        .map_err(|e| GenerationError::InvalidEndpoint(e.to_string()))
}

fn vertex_endpoint(project_id: &str, location: &str, model: &str) -> Result<Url, GenerationError> {
    let raw = format!(
        "https://{location}-aiplatform.googleapis.com/v1/projects/{project_id}/locations/{location}/publishers/google/models/{model}:generateContent"
    );
    Url::parse(&raw).map_err(|e| GenerationError::InvalidEndpoint(e.to_string()))
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let started = Instant::now();
        let body = GeminiRequest::from_prompt(prompt);

        let request = self.http.post(self.endpoint.clone()).json(&body);
        let request = match &self.auth {
            Auth::ApiKey(key) => request.header(API_KEY_HEADER, key),
            Auth::Bearer(token) => request.bearer_auth(token),
        };

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&text)?;
        let output = parsed.into_text()?;

        debug!(
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = output.len(),
            "Gemini generation complete"
        );
        Ok(output)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

impl GeminiRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiResponse {
    /// Concatenate the text parts of the first candidate
    fn into_text(self) -> Result<String, GenerationError> {
        if let Some(error) = self.error {
            return Err(GenerationError::Remote(error.message));
        }

        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match block_reason {
                Some(reason) => GenerationError::Blocked(reason),
                None => GenerationError::EmptyResponse,
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if !text.is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason.as_deref() {
            Some(reason) if reason != "STOP" => Err(GenerationError::Blocked(reason.to_string())),
            _ => Err(GenerationError::EmptyResponse),
        }
    }
}
