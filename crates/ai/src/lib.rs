//! Client for the generative-text upstream (Google Gemini `generateContent`).
//!
//! Stateless single-shot proxy: one request in, one generated text out.
//! No retries, no caching. The credential is checked per request, never at
//! construction, so a server without a key still starts and every other
//! endpoint works.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default upstream base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model name, matching the original deployment.
const DEFAULT_MODEL: &str = "gemini-pro";

/// Default upstream request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from the generative-text client.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API key is configured. Raised before any network activity.
    #[error("Generative AI credential is not configured")]
    Configuration,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream returned a non-2xx status code.
    #[error("Upstream error ({status}): {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body for server-side logging.
        body: String,
    },

    /// The upstream response decoded but contained no generated text.
    #[error("Upstream response contained no generated text")]
    EmptyResponse,
}

/// Configuration for [`GenerativeClient`], read from the environment.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Upstream API key. `None` means the proxy is unconfigured; requests
    /// fail with [`AiError::Configuration`] without touching the network.
    pub api_key: Option<String>,
    /// Model name used in the request path.
    pub model: String,
    /// Base URL of the upstream API (overridable for tests).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Required | Default                                    |
    /// |-------------------|----------|--------------------------------------------|
    /// | `GOOGLE_AI_KEY`   | no       | -- (proxy unconfigured without it)         |
    /// | `AI_MODEL`        | no       | `gemini-pro`                               |
    /// | `AI_BASE_URL`     | no       | `https://generativelanguage.googleapis.com`|
    /// | `AI_TIMEOUT_SECS` | no       | `30`                                       |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GOOGLE_AI_KEY").ok().filter(|k| !k.is_empty());
        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let base_url = std::env::var("AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            model,
            base_url,
            timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for the `generateContent` endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response body from the `generateContent` endpoint; only the fields we
/// consume are modeled.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenate the text parts of the first candidate, verbatim.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the generative-text upstream.
pub struct GenerativeClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl GenerativeClient {
    /// Build a client from configuration.
    ///
    /// The request timeout is baked into the inner [`reqwest::Client`], so
    /// every call is bounded without per-call wiring.
    pub fn new(config: AiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");
        Self { client, config }
    }

    /// Whether an upstream credential is configured.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Forward a prompt to the upstream and return the generated text
    /// verbatim.
    ///
    /// Fails with [`AiError::Configuration`] before any network activity
    /// when no key is configured. Never retries.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::Configuration)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.into_text().ok_or(AiError::EmptyResponse)
    }
}
