pub mod llm {
    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        System,
        User,
        Assistant,
    }

    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
    pub struct Message {
        pub role: Role,
        pub content: String,
    }

    impl Message {
        pub fn system<S: Into<String>>(s: S) -> Self {
            Self {
                role: Role::System,
                content: s.into(),
            }
        }
        pub fn user<S: Into<String>>(s: S) -> Self {
            Self {
                role: Role::User,
                content: s.into(),
            }
        }
        pub fn assistant<S: Into<String>>(s: S) -> Self {
            Self {
                role: Role::Assistant,
                content: s.into(),
            }
        }
    }

    /// Sampling preset applied to every request built from it.
    #[derive(Clone, Debug, PartialEq)]
    pub struct ChatOpts {
        pub model: String,
        pub temperature: f32,
        pub top_p: f32,
        pub max_tokens: u32,
    }

    /// Body of `POST /api/chat`, and of the upstream chat-completions call.
    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
    pub struct ChatRequest {
        pub model: String,
        pub messages: Vec<Message>,
        pub temperature: f32,
        pub top_p: f32,
        pub max_tokens: u32,
    }

    impl ChatRequest {
        pub fn new(opts: &ChatOpts, messages: Vec<Message>) -> Self {
            Self {
                model: opts.model.clone(),
                messages,
                temperature: opts.temperature,
                top_p: opts.top_p,
                max_tokens: opts.max_tokens,
            }
        }
    }

    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
    pub struct Choice {
        pub message: Message,
        #[serde(default)]
        pub finish_reason: Option<String>,
        #[serde(default)]
        pub index: u32,
    }

    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
    pub struct ChatResponse {
        pub choices: Vec<Choice>,
    }

    impl ChatResponse {
        /// Text of the first choice. Later choices are never consumed.
        pub fn first_text(&self) -> Result<&str, ChatError> {
            self.choices
                .first()
                .map(|c| c.message.content.as_str())
                .ok_or_else(|| ChatError::Protocol("response has no choices".into()))
        }
    }

    #[derive(Error, Debug)]
    pub enum ChatError {
        #[error("auth error: {0}")] Auth(String),
        #[error("status {status}: {body}")] Status { status: u16, body: String },
        #[error("timeout: {0}")] Timeout(String),
        #[error("network: {0}")] Network(String),
        #[error("decode: {0}")] Decode(String),
        #[error("protocol: {0}")] Protocol(String),
        #[error("canceled")] Canceled,
        #[error("other: {0}")] Other(String),
    }

    impl ChatError {
        pub fn is_timeout(&self) -> bool {
            matches!(self, ChatError::Timeout(_))
        }
    }

    #[allow(async_fn_in_trait)]
    pub trait ModelClient: Send + Sync {
        async fn send_chat(&self, req: &ChatRequest) -> Result<ChatResponse, ChatError>;
    }
}
