//! Google Gemini engine implementation
//!
//! This module implements the ReasoningEngine trait against the Gemini
//! `generateContent` REST endpoint.
//! See: https://ai.google.dev/api/generate-content

use crate::{EngineError, ReasoningEngine, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Gemini engine
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the Generative Language API
    pub api_key: String,
    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new configuration with the default model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the HTTP timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Google Gemini reasoning engine
pub struct GeminiEngine {
    client: Client,
    config: GeminiConfig,
}

impl GeminiEngine {
    /// Create a new Gemini engine
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create an engine from environment variables
    ///
    /// Reads the API key from `GEMINI_API_KEY` and, if set, the model from
    /// `GEMINI_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            EngineError::ConfigurationError(
                "GEMINI_API_KEY environment variable not set".to_string(),
            )
        })?;
        let mut config = GeminiConfig::new(api_key);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config = config.with_model(model);
        }
        Self::new(config)
    }
}

#[async_trait]
impl ReasoningEngine for GeminiEngine {
    #[instrument(skip(self, directive), fields(model = %self.config.model))]
    async fn reason(&self, directive: &str) -> Result<String> {
        debug!("Sending request to Gemini API");

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: directive.to_string(),
                }],
            }],
        };

        let url = format!(
            "{GEMINI_API_BASE}/models/{}:generateContent",
            self.config.model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        // Handle errors
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => EngineError::AuthenticationFailed,
                429 => EngineError::RateLimitExceeded(error_text),
                400 => EngineError::InvalidRequest(error_text),
                404 => EngineError::ModelNotFound(self.config.model.clone()),
                _ => EngineError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        // Parse response
        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            EngineError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::UnexpectedResponse("no candidates returned".to_string()))?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(EngineError::UnexpectedResponse(
                "candidate contained no text".to_string(),
            ));
        }

        debug!(
            finish_reason = candidate.finish_reason.as_deref().unwrap_or("unknown"),
            "Received response from Gemini API"
        );

        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// =========== Gemini API types ===========

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
    #[serde(default)]
    finish_reason: Option<String>,
}
