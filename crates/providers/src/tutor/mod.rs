//! Tutor chat service: builds prompts, calls the chat proxy under a client-side
//! timeout, retries once on the fallback model after a timeout, and always
//! hands back display-ready text.

pub mod client;
pub mod config;
pub mod prompts;

pub use client::ProxyClient;
pub use config::TutorConfig;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tutor_core::llm::{ChatError, ChatRequest, Message, ModelClient};

pub struct TutorService<C> {
    client: C,
    cfg: TutorConfig,
}

impl TutorService<ProxyClient> {
    pub fn from_config(cfg: TutorConfig) -> anyhow::Result<Self> {
        let client = ProxyClient::new(&cfg)?;
        Ok(Self::new(client, cfg))
    }
}

impl<C: ModelClient> TutorService<C> {
    pub fn new(client: C, cfg: TutorConfig) -> Self {
        Self { client, cfg }
    }

    /// System prompt for `topic` followed by `messages` in their original order.
    pub fn tutor_request(&self, messages: &[Message], topic: &str) -> ChatRequest {
        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(Message::system(prompts::tutor_system_prompt(topic)));
        all.extend_from_slice(messages);
        ChatRequest::new(&self.cfg.primary, all)
    }

    pub fn code_feedback_request(&self, code: &str, language: &str) -> ChatRequest {
        ChatRequest::new(
            &self.cfg.primary,
            vec![
                Message::system(prompts::code_review_system_prompt(language)),
                Message::user(prompts::code_review_user_prompt(code, language)),
            ],
        )
    }

    /// Same conversation, re-targeted at the smaller fallback model.
    pub fn fallback_request(&self, primary: &ChatRequest) -> ChatRequest {
        ChatRequest::new(&self.cfg.fallback, primary.messages.clone())
    }

    pub async fn generate_tutor_response(&self, messages: &[Message], topic: &str) -> String {
        self.generate_tutor_response_with_cancel(messages, topic, &CancellationToken::new())
            .await
    }

    pub async fn generate_tutor_response_with_cancel(
        &self,
        messages: &[Message],
        topic: &str,
        cancel: &CancellationToken,
    ) -> String {
        self.tutor_reply_with_cancel(messages, topic, cancel)
            .await
            .unwrap_or_else(|apology| apology)
    }

    /// Same call, but a failure comes back as `Err(apology)` so a caller
    /// keeping history can tell it from a model answer.
    pub async fn tutor_reply_with_cancel(
        &self,
        messages: &[Message],
        topic: &str,
        cancel: &CancellationToken,
    ) -> Result<String, String> {
        let req = self.tutor_request(messages, topic);
        self.complete(req, cancel).await.map_err(|e| {
            error!(target:"providers::tutor", "tutor response failed topic={} error={}", topic, e);
            prompts::tutor_apology(topic)
        })
    }

    pub async fn generate_code_feedback(&self, code: &str, language: &str) -> String {
        self.generate_code_feedback_with_cancel(code, language, &CancellationToken::new())
            .await
    }

    pub async fn generate_code_feedback_with_cancel(
        &self,
        code: &str,
        language: &str,
        cancel: &CancellationToken,
    ) -> String {
        let req = self.code_feedback_request(code, language);
        match self.complete(req, cancel).await {
            Ok(text) => text,
            Err(e) => {
                error!(target:"providers::tutor", "code feedback failed language={} error={}", language, e);
                prompts::feedback_apology(language)
            }
        }
    }

    async fn complete(
        &self,
        req: ChatRequest,
        cancel: &CancellationToken,
    ) -> Result<String, ChatError> {
        match self.send_bounded(&req, cancel).await {
            Err(e) if e.is_timeout() && self.cfg.fallback_on_timeout => {
                let fb = self.fallback_request(&req);
                warn!(target:"providers::tutor", "primary timed out model={}, retrying once with model={}", req.model, fb.model);
                self.send_bounded(&fb, cancel).await
            }
            other => other,
        }
    }

    /// One call to the transport, bounded by the configured timeout and the
    /// caller's token. Either exit drops the in-flight request.
    async fn send_bounded(
        &self,
        req: &ChatRequest,
        cancel: &CancellationToken,
    ) -> Result<String, ChatError> {
        let limit = self.cfg.timeout;
        let resp = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ChatError::Canceled),
            res = tokio::time::timeout(limit, self.client.send_chat(req)) => match res {
                Ok(r) => r?,
                Err(_) => {
                    return Err(ChatError::Timeout(format!(
                        "model {} did not answer within {}ms",
                        req.model,
                        limit.as_millis()
                    )))
                }
            },
        };
        let text = resp.first_text()?.to_string();
        info!(target:"providers::tutor", "reply model={} chars={}", req.model, text.len());
        Ok(text)
    }
}
