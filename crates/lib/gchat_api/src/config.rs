//! Relay server configuration.

use std::fmt;

use gchat_core::gemini::GEMINI_API_URL;
use thiserror::Error;

/// Port the relay listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 5000;

/// Host the relay binds to unless told otherwise.
pub const DEFAULT_HOST: &str = "127.0.0.1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Configuration for the relay server.
#[derive(Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:5000").
    pub bind_addr: String,
    /// Gemini API key, appended to every upstream call.
    pub gemini_api_key: String,
    /// Upstream `generateContent` endpoint.
    pub gemini_api_url: String,
}

impl ApiConfig {
    /// Builds a config with the fixed upstream endpoint.
    pub fn new(bind_addr: impl Into<String>, gemini_api_key: impl Into<String>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            gemini_api_key: gemini_api_key.into(),
            gemini_api_url: GEMINI_API_URL.to_string(),
        }
    }

    /// Rejects configurations the relay cannot serve with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar("GEMINI_API_KEY"));
        }
        if self.bind_addr.rsplit_once(':').is_none_or(|(_, port)| port.parse::<u16>().is_err()) {
            return Err(ConfigError::InvalidVar {
                name: "bind address",
                value: self.bind_addr.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_api_url", &self.gemini_api_url)
            .finish()
    }
}
