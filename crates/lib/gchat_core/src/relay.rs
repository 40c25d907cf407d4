//! Relay wire contract and the front-end's client for it.
//!
//! The relay exposes `POST /api/gemini` taking `{"prompt": ...}` and returning
//! either the upstream payload verbatim (200) or
//! `{"error": "Error fetching Gemini response"}` (500).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Route served by the relay.
pub const RELAY_ROUTE: &str = "/api/gemini";

/// Body of every failed relay call.
pub const RELAY_ERROR_MESSAGE: &str = "Error fetching Gemini response";

/// Relay request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Relay failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: String,
}

impl RelayErrorBody {
    pub fn generic() -> Self {
        Self {
            error: RELAY_ERROR_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid relay URL: {0}")]
    InvalidUrl(String),

    #[error("Relay request failed: {0}")]
    Transport(String),

    #[error("Relay returned {0}")]
    Status(u16),

    #[error("Relay response parse error: {0}")]
    Payload(String),
}

/// Anything that can answer a prompt with a Gemini-shaped payload.
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn relay(&self, prompt: &str) -> Result<Value, RelayError>;
}

/// [`RelayClient`] that talks to a running relay over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    http: Client,
    endpoint: Url,
}

impl HttpRelayClient {
    /// `base_url` is the relay origin, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> Result<Self, RelayError> {
        let base: Url = base_url
            .parse()
            .map_err(|e| RelayError::InvalidUrl(format!("{base_url}: {e}")))?;
        let endpoint = base
            .join(RELAY_ROUTE)
            .map_err(|e| RelayError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn relay(&self, prompt: &str) -> Result<Value, RelayError> {
        debug!(endpoint = %self.endpoint, "submitting prompt to relay");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&RelayRequest {
                prompt: Some(prompt.to_owned()),
            })
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(RelayError::Status(resp.status().as_u16()));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| RelayError::Payload(e.to_string()))
    }
}
