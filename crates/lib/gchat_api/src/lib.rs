//! # gchat_api
//!
//! HTTP relay library for gchat: one route that forwards a prompt to Gemini
//! with the server-held API key.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

use axum::Router;
use axum::routing::post;
use gchat_core::gemini::{GeminiClient, UpstreamError};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::gemini;

/// Shared application state passed to all handlers.
///
/// Holds no mutable state; every request is independent.
#[derive(Clone, Debug)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Upstream client (pooled connections, shared).
    pub gemini: GeminiClient,
}

impl AppState {
    /// Builds the state, creating the upstream client from `config`.
    pub fn from_config(config: ApiConfig) -> Result<Self, UpstreamError> {
        let gemini = GeminiClient::new(&config.gemini_api_url, config.gemini_api_key.clone())?;
        Ok(Self { config, gemini })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::POST_API_GEMINI, post(gemini::gemini_handler))
        .layer(axum::middleware::from_fn(middleware::request_log::log_requests))
        .layer(cors)
        .with_state(state)
}
