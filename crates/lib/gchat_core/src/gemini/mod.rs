//! Gemini upstream client.
//!
//! One `generateContent` call per prompt, authenticated with the API key as
//! the `key` query parameter. No retries and no timeout override: the call
//! runs until the transport completes or fails.

pub mod models;

use std::fmt;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub use models::{Content, GenerateContentRequest, Part, extract_text};

/// Fixed content-generation endpoint.
pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Errors from a single upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Upstream response parse error: {0}")]
    Payload(String),
}

/// Client for the Gemini `generateContent` endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client for `endpoint` with a fresh connection pool.
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self, UpstreamError> {
        Self::with_client(Client::new(), endpoint, api_key)
    }

    pub fn with_client(
        http: Client,
        endpoint: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, UpstreamError> {
        let endpoint: Url = endpoint
            .parse()
            .map_err(|e| UpstreamError::InvalidUrl(format!("{endpoint}: {e}")))?;
        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
        })
    }

    /// The endpoint without the credential.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `prompt` upstream and returns the reply payload verbatim.
    ///
    /// The prompt is not validated; `None` and `Some("")` are forwarded as-is.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Transport`]: connection or I/O failure.
    /// - [`UpstreamError::Status`]: upstream answered with a non-2xx status.
    /// - [`UpstreamError::Payload`]: the reply body is not JSON.
    pub async fn generate(&self, prompt: Option<&str>) -> Result<Value, UpstreamError> {
        let body = GenerateContentRequest::from_prompt(prompt);

        debug!(endpoint = %self.endpoint, "forwarding prompt upstream");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| UpstreamError::Payload(e.without_url().to_string()))
    }
}

// The API key must never reach logs.
impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-pro:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(&format!("{}{GENERATE_PATH}", server.uri()), "test-key").unwrap()
    }

    #[tokio::test]
    async fn generate_returns_payload_verbatim() {
        let server = MockServer::start().await;
        let reply = json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hi there!" }] } }],
            "usageMetadata": { "totalTokenCount": 7 }
        });
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({ "contents": [{ "parts": [{ "text": "Hello" }] }] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client_for(&server).generate(Some("Hello")).await.unwrap();
        assert_eq!(payload, reply);
    }

    #[tokio::test]
    async fn absent_prompt_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "contents": [{ "parts": [{}] }] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client_for(&server).generate(None).await.unwrap();
        assert_eq!(payload, json!({}));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate(Some("Hello")).await.unwrap_err();
        match err {
            UpstreamError::Status { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "API key not valid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_reply_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate(Some("Hello")).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Payload(_)), "got {err}");
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        // Nothing listens on port 1.
        let client = GeminiClient::new("http://127.0.0.1:1/generate", "test-key").unwrap();
        let err = client.generate(Some("Hello")).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)), "got {err}");
    }

    #[test]
    fn invalid_endpoint_rejected() {
        let err = GeminiClient::new("not a url", "k").unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidUrl(_)));
    }

    #[test]
    fn debug_redacts_key() {
        let client = GeminiClient::new(GEMINI_API_URL, "super-secret").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
