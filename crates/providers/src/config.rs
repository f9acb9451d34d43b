use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::warn;

pub const APP_DIR: &str = "code-tutor";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FileConfig {
    pub upstream: Option<UpstreamFileConfig>,
    pub server: Option<ServerFileConfig>,
    pub tutor: Option<TutorFileConfig>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpstreamFileConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    pub bind: Option<String>,
    pub max_body_bytes: Option<usize>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TutorFileConfig {
    pub proxy_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub fallback_on_timeout: Option<bool>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    pub fallback_model: Option<String>,
    pub fallback_temperature: Option<f32>,
    pub fallback_top_p: Option<f32>,
    pub fallback_max_tokens: Option<u32>,
}

impl FileConfig {
    /// Reads the user config file. A missing or unreadable file yields defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(target:"providers::config", path = %path.display(), error = %e, "cannot read config file");
                return Self::default();
            }
        };
        Self::parse(&text).unwrap_or_else(|e| {
            warn!(target:"providers::config", path = %path.display(), error = %e, "ignoring unparseable config file");
            Self::default()
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        let p = if cfg!(target_os = "windows") {
            base.home_dir().join(".code-tutor").join("config.toml")
        } else {
            base.config_dir().join(APP_DIR).join("config.toml")
        };
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_sections() {
        let cfg = FileConfig::parse(
            r#"
            [upstream]
            base_url = "https://example.test/v1"
            timeout_ms = 9000

            [server]
            bind = "0.0.0.0:9000"

            [tutor]
            proxy_url = "http://localhost:9000/api/chat"
            fallback_on_timeout = false
            fallback_model = "tiny"
            "#,
        )
        .unwrap();
        let up = cfg.upstream.unwrap();
        assert_eq!(up.base_url.as_deref(), Some("https://example.test/v1"));
        assert_eq!(up.timeout_ms, Some(9000));
        assert_eq!(cfg.server.unwrap().bind.as_deref(), Some("0.0.0.0:9000"));
        let tutor = cfg.tutor.unwrap();
        assert_eq!(tutor.fallback_on_timeout, Some(false));
        assert_eq!(tutor.fallback_model.as_deref(), Some("tiny"));
        assert_eq!(tutor.model, None);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = FileConfig::parse("").unwrap();
        assert!(cfg.upstream.is_none());
        assert!(cfg.server.is_none());
        assert!(cfg.tutor.is_none());
    }

    #[test]
    fn unparseable_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("code-tutor-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[tutor\nproxy_url = ").unwrap();
        let cfg = FileConfig::load_from(&path);
        assert!(cfg.tutor.is_none());
        let _ = fs::remove_dir_all(&dir);
    }
}
