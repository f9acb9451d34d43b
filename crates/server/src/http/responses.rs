//! HTTP response bodies.

use serde::Serialize;

/// Error response.
///
/// `message` carries the underlying error text, `details` the raw upstream
/// body when the upstream rejected the call.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Response for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub credential_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted() {
        let v = serde_json::to_value(ErrorResponse::new("Method not allowed")).unwrap();
        assert_eq!(v, serde_json::json!({"error": "Method not allowed"}));

        let v = serde_json::to_value(
            ErrorResponse::new("Upstream API returned 429").with_details("slow down"),
        )
        .unwrap();
        assert_eq!(
            v,
            serde_json::json!({"error": "Upstream API returned 429", "details": "slow down"})
        );
    }
}
