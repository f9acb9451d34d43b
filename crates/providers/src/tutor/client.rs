use crate::error::{map_reqwest_err, map_status_err};
use crate::tutor::config::TutorConfig;
use reqwest::{header, Client};
use tokio::time::Duration;
use tracing::{debug, warn};
use tutor_core::llm::{ChatError, ChatRequest, ChatResponse, ModelClient};

/// Talks to the chat proxy. Carries no credential: the proxy owns it.
#[derive(Clone)]
pub struct ProxyClient {
    http: Client,
    url: String,
}

impl ProxyClient {
    pub fn new(cfg: &TutorConfig) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let http = Client::builder()
            .default_headers(headers)
            .use_rustls_tls()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(2)
            // HTTP(S)_PROXY is for the upstream hop, not the proxy itself.
            .no_proxy()
            .build()?;
        Ok(Self {
            http,
            url: cfg.proxy_url.clone(),
        })
    }
}

impl ModelClient for ProxyClient {
    async fn send_chat(&self, req: &ChatRequest) -> Result<ChatResponse, ChatError> {
        debug!(target:"providers::tutor", "post chat model={} messages={} url={}", req.model, req.messages.len(), self.url);
        let resp = self
            .http
            .post(&self.url)
            .json(req)
            .send()
            .await
            .map_err(map_reqwest_err)?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.ok();
            warn!(target:"providers::tutor", "proxy non-200 status={} body={:?}", status, body);
            return Err(map_status_err(status, body));
        }
        resp.json::<ChatResponse>()
            .await
            .map_err(|e| ChatError::Decode(e.to_string()))
    }
}
