use crate::config::FileConfig;
use std::{env, fmt, time::Duration};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://integrate.api.nvidia.com/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 12_000;

#[derive(Clone)]
pub struct NvidiaConfig {
    /// Server-owned bearer credential. `None` means every proxied call is refused.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub proxy: Option<String>,
}

impl fmt::Debug for NvidiaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NvidiaConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl NvidiaConfig {
    pub fn from_env_and_file() -> anyhow::Result<Self> {
        Self::from_sources(&FileConfig::load(), |k| env::var(k).ok())
    }

    pub fn from_sources(
        file: &FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let api_key = env("NVIDIA_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let mut base_url = DEFAULT_BASE_URL.to_string();
        let mut timeout_ms = DEFAULT_TIMEOUT_MS;
        if let Some(up) = &file.upstream {
            if let Some(b) = &up.base_url {
                base_url = b.clone();
            }
            if let Some(t) = up.timeout_ms {
                timeout_ms = t;
            }
        }
        if let Some(b) = env("NVIDIA_BASE_URL") {
            base_url = b;
        }

        let proxy = env("HTTPS_PROXY").or_else(|| env("HTTP_PROXY"));

        let cfg = NvidiaConfig {
            api_key,
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            proxy,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| anyhow::anyhow!("invalid upstream base_url '{}': {}", self.base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("upstream base_url must be http(s): {}", self.base_url);
        }
        if self.timeout.is_zero() {
            anyhow::bail!("upstream timeout must be greater than zero");
        }
        Ok(())
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_key() {
        let cfg = NvidiaConfig::from_sources(&FileConfig::default(), env_of(&[])).unwrap();
        assert!(!cfg.has_credential());
        assert_eq!(cfg.chat_url(), "https://integrate.api.nvidia.com/v1/chat/completions");
        assert_eq!(cfg.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let cfg =
            NvidiaConfig::from_sources(&FileConfig::default(), env_of(&[("NVIDIA_API_KEY", "  ")]))
                .unwrap();
        assert!(!cfg.has_credential());
    }

    #[test]
    fn env_overrides_file() {
        let file = FileConfig::parse(
            "[upstream]\nbase_url = \"https://file.test/v1/\"\ntimeout_ms = 500\n",
        )
        .unwrap();
        let cfg = NvidiaConfig::from_sources(
            &file,
            env_of(&[("NVIDIA_API_KEY", "k"), ("NVIDIA_BASE_URL", "http://env.test/v1")]),
        )
        .unwrap();
        assert_eq!(cfg.chat_url(), "http://env.test/v1/chat/completions");
        assert_eq!(cfg.timeout, Duration::from_millis(500));
        assert_eq!(cfg.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn rejects_bad_url_and_zero_timeout() {
        let bad = NvidiaConfig::from_sources(
            &FileConfig::default(),
            env_of(&[("NVIDIA_BASE_URL", "not a url")]),
        );
        assert!(bad.is_err());
        let file = FileConfig::parse("[upstream]\ntimeout_ms = 0\n").unwrap();
        assert!(NvidiaConfig::from_sources(&file, env_of(&[])).is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = NvidiaConfig::from_sources(
            &FileConfig::default(),
            env_of(&[("NVIDIA_API_KEY", "nvapi-secret")]),
        )
        .unwrap();
        let s = format!("{cfg:?}");
        assert!(!s.contains("nvapi-secret"));
        assert!(s.contains("<redacted>"));
    }
}
