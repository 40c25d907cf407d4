//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gchat_core::gemini::UpstreamError;
use gchat_core::relay::RelayErrorBody;
use thiserror::Error;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Relay errors. Every variant maps to the same generic 500 so callers
/// cannot tell upstream outages, auth failures and bad payloads apart.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RelayErrorBody::generic()),
        )
            .into_response()
    }
}
