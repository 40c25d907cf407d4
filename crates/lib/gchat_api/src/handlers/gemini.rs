//! Gemini relay handler.
//!
//! `POST /api/gemini` forwards `{"prompt": ...}` upstream with the server's
//! API key and returns the upstream payload untouched.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use gchat_core::relay::RelayRequest;
use serde_json::Value;
use tracing::{debug, error};

use crate::AppState;
use crate::error::{AppError, AppResult};

/// `POST /api/gemini`: relay a prompt to Gemini.
///
/// The prompt is not validated. A missing, non-JSON or otherwise unreadable
/// body is forwarded as an absent prompt.
pub async fn gemini_handler(
    State(state): State<AppState>,
    body: Result<Json<RelayRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let prompt = match body {
        Ok(Json(request)) => request.prompt,
        Err(rejection) => {
            debug!(%rejection, "unreadable relay body, forwarding without prompt");
            None
        }
    };

    let payload = state
        .gemini
        .generate(prompt.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "Error fetching Gemini response");
            AppError::from(e)
        })?;

    Ok(Json(payload))
}
