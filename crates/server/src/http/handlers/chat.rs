//! Chat forwarding handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::de::IgnoredAny;
use tracing::{debug, error, info, warn};
use tutor_core::llm::ChatError;

use crate::http::responses::ErrorResponse;
use crate::state::AppState;

const REDACTED_HEADERS: &[&str] = &["authorization", "cookie", "x-api-key", "proxy-authorization"];

/// Chat forwarding endpoint.
///
/// Sends the request body unchanged to the upstream chat-completions API
/// using the server credential and relays the reply. Caller-supplied
/// `Authorization` headers are never forwarded.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    debug!(target: "server::http", headers = ?redacted(&headers), "Inbound chat request");

    if !state.upstream.has_credential() {
        error!(target: "server::http", "Chat requested but NVIDIA_API_KEY is not configured");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("API key not configured"),
        );
    }

    if headers.contains_key(header::AUTHORIZATION) {
        warn!(target: "server::http", "Ignoring caller-supplied Authorization header");
    }

    let forwarded = match state.upstream.forward(body).await {
        Ok(f) => f,
        Err(ChatError::Timeout(msg)) => {
            warn!(target: "server::http", error = %msg, "Upstream request timed out");
            return error_response(
                StatusCode::GATEWAY_TIMEOUT,
                ErrorResponse::new("Upstream request timed out").with_message(msg),
            );
        }
        Err(e) => {
            error!(target: "server::http", error = %e, "Proxy error");
            return proxy_failure(e.to_string());
        }
    };

    if !forwarded.status.is_success() {
        let details = String::from_utf8_lossy(&forwarded.body).into_owned();
        error!(
            target: "server::http",
            status = forwarded.status.as_u16(),
            details = %details,
            "Upstream API error"
        );
        return error_response(
            forwarded.status,
            ErrorResponse::new(format!(
                "Upstream API returned {}",
                forwarded.status.as_u16()
            ))
            .with_details(details),
        );
    }

    if let Err(e) = serde_json::from_slice::<IgnoredAny>(&forwarded.body) {
        error!(target: "server::http", error = %e, "Upstream returned a body that is not JSON");
        return proxy_failure(e.to_string());
    }

    info!(target: "server::http", bytes = forwarded.body.len(), "Chat reply relayed");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        forwarded.body,
    )
        .into_response()
}

/// Any method other than POST on `/api/chat`.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorResponse::new("Method not allowed"),
    )
}

fn proxy_failure(message: String) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new("Failed to proxy request").with_message(message),
    )
}

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

fn redacted(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name = name.as_str().to_string();
            let value = if REDACTED_HEADERS.contains(&name.as_str()) {
                "<redacted>".to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            (name, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn secrets_are_redacted_in_logs() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer caller"));
        headers.insert(header::COOKIE, HeaderValue::from_static("sid=1"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let out = redacted(&headers);
        let get = |k: &str| out.iter().find(|(n, _)| n == k).map(|(_, v)| v.clone());
        assert_eq!(get("authorization").as_deref(), Some("<redacted>"));
        assert_eq!(get("cookie").as_deref(), Some("<redacted>"));
        assert_eq!(get("content-type").as_deref(), Some("application/json"));
    }
}
