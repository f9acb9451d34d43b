use crate::error::map_reqwest_err;
use crate::nvidia::config::NvidiaConfig;
use bytes::Bytes;
use reqwest::{header, Client, StatusCode};
use tokio::time::Duration;
use tracing::{debug, info};
use tutor_core::llm::ChatError;

/// Raw reply from the upstream chat-completions endpoint.
#[derive(Debug)]
pub struct Forwarded {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Forwards request bodies to the upstream endpoint untouched, adding the
/// server credential. The reqwest client carries the request timeout, so a
/// timed-out call is dropped rather than left running.
#[derive(Clone)]
pub struct NvidiaClient {
    http: Client,
    cfg: NvidiaConfig,
}

impl NvidiaClient {
    pub fn new(cfg: NvidiaConfig) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let mut builder = Client::builder()
            .default_headers(headers)
            .use_rustls_tls()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(2)
            .timeout(cfg.timeout);
        // Outbound proxying comes from config only.
        builder = match &cfg.proxy {
            Some(p) => builder.proxy(reqwest::Proxy::all(p)?),
            None => builder.no_proxy(),
        };
        let http = builder.build()?;
        Ok(Self { http, cfg })
    }

    pub fn has_credential(&self) -> bool {
        self.cfg.has_credential()
    }

    pub async fn forward(&self, body: Bytes) -> Result<Forwarded, ChatError> {
        let Some(key) = self.cfg.api_key.as_deref() else {
            return Err(ChatError::Auth("API key not configured".into()));
        };
        let url = self.cfg.chat_url();
        info!(target:"providers::nvidia", "forward chat url={} bytes={}", url, body.len());
        let resp = self
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(key)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_err)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(map_reqwest_err)?;
        debug!(target:"providers::nvidia", "upstream replied status={} bytes={}", status, body.len());
        Ok(Forwarded { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(key: Option<&str>) -> NvidiaConfig {
        NvidiaConfig {
            api_key: key.map(str::to_string),
            base_url: "http://127.0.0.1:9/v1".into(),
            timeout: Duration::from_millis(200),
            proxy: None,
        }
    }

    #[tokio::test]
    async fn forward_without_key_never_connects() {
        let client = NvidiaClient::new(cfg(None)).unwrap();
        let err = client.forward(Bytes::from_static(b"{}")).await.unwrap_err();
        assert!(matches!(err, ChatError::Auth(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let mut c = cfg(Some("k"));
        c.base_url = format!("http://127.0.0.1:{port}/v1");
        let client = NvidiaClient::new(c).unwrap();
        let err = client.forward(Bytes::from_static(b"{}")).await.unwrap_err();
        assert!(matches!(err, ChatError::Network(_)), "got {err:?}");
    }
}
