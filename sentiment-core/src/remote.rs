//! Hosted pretrained sentiment model.
//!
//! Talks to the Hugging Face inference API
//! (`cardiffnlp/twitter-roberta-base-sentiment-latest` by default).
//!
//! # Wire format
//!
//! Request: `POST <endpoint>` with `{"inputs": "<text>"}`.
//!
//! Response: candidates with confidence scores, either nested per input
//! (`[[{"label": "positive", "score": 0.93}, ...]]`) or flat
//! (`[{"label": ..., "score": ...}, ...]`). Anything else is malformed.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use sentiment_common::config::RemoteModelConfig;

use crate::error::RemoteError;
use crate::label::Label;

/// The hosted model rejects longer inputs.
pub const MAX_INPUT_CHARS: usize = 512;

/// A hosted classifier reachable over the network.
///
/// Implementations report every failure as a `RemoteError`; the classifier
/// decides what to fall back to.
#[async_trait]
pub trait RemoteModel: Send + Sync {
    /// Model name for logging
    fn name(&self) -> &str;

    /// Classify a single text.
    async fn classify(&self, text: &str) -> Result<Label, RemoteError>;
}

/// Keep at most `MAX_INPUT_CHARS` characters, respecting char boundaries.
pub fn truncate_input(text: &str) -> &str {
    match text.char_indices().nth(MAX_INPUT_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// One scored label from the inference API.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<Candidate>>),
    Flat(Vec<Candidate>),
}

/// Validate an inference response body and map its best candidate to a label.
pub fn parse_response(body: &str) -> Result<Label, RemoteError> {
    let response: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| RemoteError::Malformed(format!("unexpected payload shape: {}", e)))?;

    let candidates = match response {
        InferenceResponse::Nested(mut per_input) => {
            if per_input.is_empty() {
                return Err(RemoteError::Malformed("empty result list".into()));
            }
            per_input.swap_remove(0)
        }
        InferenceResponse::Flat(candidates) => candidates,
    };

    let best = candidates
        .into_iter()
        .filter(|c| c.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| RemoteError::Malformed("no scored candidates".into()))?;

    Ok(Label::from_model_label(&best.label))
}

/// Hugging Face inference API client.
pub struct HuggingFaceModel {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HuggingFaceModel {
    /// Create a client for an inference endpoint.
    pub fn new(endpoint: impl Into<String>, api_token: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            endpoint: endpoint.into(),
            api_token: api_token.filter(|t| !t.is_empty()),
        }
    }

    /// Create from config. Returns `None` when the remote model is disabled.
    pub fn from_config(config: &RemoteModelConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }

        Some(Self::new(
            config.endpoint.clone(),
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteModel for HuggingFaceModel {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify(&self, text: &str) -> Result<Label, RemoteError> {
        let inputs = truncate_input(text);

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": inputs }));

        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(endpoint = %self.endpoint, chars = inputs.chars().count(), "Calling remote model");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Network("Request timeout".into())
            } else if e.is_connect() {
                RemoteError::Network("Connection failed".into())
            } else {
                RemoteError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Network(format!("Failed to read body: {}", e)))?;

        if status != StatusCode::OK {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}
