use reqwest::StatusCode;
use tutor_core::llm::ChatError;

pub(crate) fn map_reqwest_err(e: reqwest::Error) -> ChatError {
    if e.is_timeout() {
        ChatError::Timeout(e.to_string())
    } else if e.is_request() || e.is_connect() {
        ChatError::Network(e.to_string())
    } else if e.is_decode() {
        ChatError::Decode(e.to_string())
    } else {
        ChatError::Other(e.to_string())
    }
}

/// A 504 from the proxy means the upstream model timed out, which callers
/// treat like a local timeout.
pub(crate) fn map_status_err(status: StatusCode, body: Option<String>) -> ChatError {
    if status == StatusCode::GATEWAY_TIMEOUT {
        return ChatError::Timeout(format!(
            "proxy answered 504: {}",
            body.unwrap_or_default()
        ));
    }
    ChatError::Status {
        status: status.as_u16(),
        body: body.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_keeps_code_and_body() {
        let e = map_status_err(StatusCode::TOO_MANY_REQUESTS, Some("slow down".into()));
        match e {
            ChatError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn gateway_timeout_counts_as_timeout() {
        let e = map_status_err(
            StatusCode::GATEWAY_TIMEOUT,
            Some(r#"{"error":"Upstream request timed out"}"#.into()),
        );
        assert!(e.is_timeout(), "got {e:?}");
        assert!(e.to_string().contains("Upstream request timed out"));
    }

    #[test]
    fn status_without_body() {
        let e = map_status_err(StatusCode::BAD_GATEWAY, None);
        assert_eq!(e.to_string(), "status 502: ");
    }
}
