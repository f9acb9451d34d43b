//! Health handler.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::http::responses::HealthResponse;
use crate::state::AppState;

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        credential_configured: state.upstream.has_credential(),
    })
}
