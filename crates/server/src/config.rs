//! Proxy server configuration.

use std::env;

use providers::config::FileConfig;
use providers::nvidia::NvidiaConfig;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Largest accepted `/api/chat` body. Code reviews carry whole source files.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Proxy server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind address.
    pub bind_addr: String,

    /// Request body limit for `/api/chat`, in bytes.
    pub max_body_bytes: usize,

    /// Upstream endpoint, credential and timeout.
    pub upstream: NvidiaConfig,
}

impl Config {
    /// Load from the config file and environment. A missing credential is not
    /// an error here: the proxy starts and answers 500 until one is set.
    pub fn load() -> anyhow::Result<Self> {
        let file = FileConfig::load();
        Self::from_sources(&file, |k| env::var(k).ok())
    }

    pub fn from_sources(
        file: &FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let upstream = NvidiaConfig::from_sources(file, &env)?;
        let bind_addr = env("TUTOR_PROXY_BIND")
            .or_else(|| file.server.as_ref().and_then(|s| s.bind.clone()))
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let max_body_bytes = file
            .server
            .as_ref()
            .and_then(|s| s.max_body_bytes)
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);
        if max_body_bytes == 0 {
            anyhow::bail!("server max_body_bytes must be greater than zero");
        }
        Ok(Self {
            bind_addr,
            max_body_bytes,
            upstream,
        })
    }
}
