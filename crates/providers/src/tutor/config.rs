use crate::config::FileConfig;
use std::{env, time::Duration};
use tutor_core::llm::ChatOpts;
use url::Url;

pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8080/api/chat";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const PRIMARY_MODEL: &str = "meta/llama-4-maverick-17b-128e-instruct";
pub const FALLBACK_MODEL: &str = "meta/llama-3.1-8b-instruct";

#[derive(Clone, Debug)]
pub struct TutorConfig {
    pub proxy_url: String,
    /// Budget for a single call to the proxy. A fallback retry gets its own.
    pub timeout: Duration,
    pub primary: ChatOpts,
    pub fallback: ChatOpts,
    pub fallback_on_timeout: bool,
}

pub fn primary_opts() -> ChatOpts {
    ChatOpts {
        model: PRIMARY_MODEL.to_string(),
        temperature: 1.0,
        top_p: 1.0,
        max_tokens: 512,
    }
}

pub fn fallback_opts() -> ChatOpts {
    ChatOpts {
        model: FALLBACK_MODEL.to_string(),
        temperature: 0.7,
        top_p: 0.9,
        max_tokens: 256,
    }
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            primary: primary_opts(),
            fallback: fallback_opts(),
            fallback_on_timeout: true,
        }
    }
}

impl TutorConfig {
    pub fn from_env_and_file() -> anyhow::Result<Self> {
        Self::from_sources(&FileConfig::load(), |k| env::var(k).ok())
    }

    pub fn from_sources(
        file: &FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        let mut proxy_url: Option<String> = None;

        if let Some(t) = &file.tutor {
            proxy_url = t.proxy_url.clone();
            if let Some(ms) = t.timeout_ms {
                cfg.timeout = Duration::from_millis(ms);
            }
            if let Some(f) = t.fallback_on_timeout {
                cfg.fallback_on_timeout = f;
            }
            if let Some(m) = &t.model {
                cfg.primary.model = m.clone();
            }
            if let Some(v) = t.temperature {
                cfg.primary.temperature = v;
            }
            if let Some(v) = t.top_p {
                cfg.primary.top_p = v;
            }
            if let Some(v) = t.max_tokens {
                cfg.primary.max_tokens = v;
            }
            if let Some(m) = &t.fallback_model {
                cfg.fallback.model = m.clone();
            }
            if let Some(v) = t.fallback_temperature {
                cfg.fallback.temperature = v;
            }
            if let Some(v) = t.fallback_top_p {
                cfg.fallback.top_p = v;
            }
            if let Some(v) = t.fallback_max_tokens {
                cfg.fallback.max_tokens = v;
            }
        }
        if let Some(u) = env("TUTOR_PROXY_URL") {
            proxy_url = Some(u);
        }
        if let Some(u) = proxy_url {
            cfg.set_proxy_url(&u)?;
        }
        if cfg.timeout.is_zero() {
            anyhow::bail!("tutor timeout must be greater than zero");
        }
        Ok(cfg)
    }

    pub fn set_proxy_url(&mut self, raw: &str) -> anyhow::Result<()> {
        let url = Url::parse(raw)
            .map_err(|e| anyhow::anyhow!("invalid proxy_url '{}': {}", raw, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("proxy_url must be http(s): {}", raw);
        }
        self.proxy_url = url.into();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_presets() {
        let cfg = TutorConfig::from_sources(&FileConfig::default(), |_| None).unwrap();
        assert_eq!(cfg.proxy_url, DEFAULT_PROXY_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(15));
        assert_eq!(cfg.primary, primary_opts());
        assert_eq!(cfg.fallback, fallback_opts());
        assert!(cfg.fallback_on_timeout);
    }

    #[test]
    fn fallback_preset_is_smaller_and_cooler() {
        let (p, f) = (primary_opts(), fallback_opts());
        assert_ne!(p.model, f.model);
        assert!(f.temperature < p.temperature);
        assert!(f.top_p < p.top_p);
        assert!(f.max_tokens < p.max_tokens);
    }

    #[test]
    fn file_and_env_overrides() {
        let file = FileConfig::parse(
            r#"
            [tutor]
            proxy_url = "http://file.test/api/chat"
            timeout_ms = 2000
            fallback_on_timeout = false
            model = "big"
            fallback_max_tokens = 64
            "#,
        )
        .unwrap();
        let cfg = TutorConfig::from_sources(&file, |k| {
            (k == "TUTOR_PROXY_URL").then(|| "https://env.test/api/chat".to_string())
        })
        .unwrap();
        assert_eq!(cfg.proxy_url, "https://env.test/api/chat");
        assert_eq!(cfg.timeout, Duration::from_secs(2));
        assert!(!cfg.fallback_on_timeout);
        assert_eq!(cfg.primary.model, "big");
        assert_eq!(cfg.fallback.max_tokens, 64);
        assert_eq!(cfg.fallback.model, FALLBACK_MODEL);
    }

    #[test]
    fn rejects_non_http_proxy_url() {
        let mut cfg = TutorConfig::default();
        assert!(cfg.set_proxy_url("ftp://x/api/chat").is_err());
        assert!(cfg.set_proxy_url("::nope").is_err());
        assert_eq!(cfg.proxy_url, DEFAULT_PROXY_URL);
    }
}
