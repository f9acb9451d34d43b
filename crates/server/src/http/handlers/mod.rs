//! HTTP request handlers.

mod chat;
mod health;

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::http::responses::ErrorResponse;

pub use chat::{chat, method_not_allowed};
pub use health::health_check;

/// Turns a handler panic into a 500 instead of dropping the connection.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(target: "server::http", panic = %message, "Handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Failed to proxy request").with_message(message)),
    )
        .into_response()
}
