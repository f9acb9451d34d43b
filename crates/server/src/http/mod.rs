//! HTTP server for the chat proxy.
//!
//! Provides endpoints for:
//! - Chat forwarding (`/api/chat`, POST only)
//! - Health check (`/health`)

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer for the browser UI served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/chat",
            post(handlers::chat)
                .fallback(handlers::method_not_allowed)
                .layer(DefaultBodyLimit::max(state.max_body_bytes)),
        )
        .route("/health", get(handlers::health_check))
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
