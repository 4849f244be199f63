use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::llm::openai::DEFAULT_BASE_URL;

pub const CONFIG_FILE: &str = "config.toml";
pub const HISTORY_FILE: &str = "history.json";

const DATA_DIR_ENV: &str = "POSTCRAFT_DATA_DIR";
const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Built-in model menu. Any other model ID can still be supplied via
/// flag, config, or the custom wizard entry.
pub const KNOWN_MODELS: [&str; 2] = ["gpt-4o-mini", "gpt-4o"];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub remote: RemoteSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

impl RemoteSettings {
    /// Remote generation runs only when enabled and the key looks like
    /// a real secret key. Anything else silently uses the demo path.
    pub fn remote_ready(&self) -> bool {
        self.enabled && is_plausible_key(&self.api_key)
    }
}

pub fn is_plausible_key(key: &str) -> bool {
    key.trim().starts_with("sk-")
}

/// Root data directory: `$POSTCRAFT_DATA_DIR` when set, `~/.postcraft`
/// otherwise.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".postcraft")
}

pub fn config_path() -> PathBuf {
    data_dir().join(CONFIG_FILE)
}

pub fn history_path() -> PathBuf {
    data_dir().join(HISTORY_FILE)
}

impl AppConfig {
    /// Load from the data dir, using defaults when no file exists. The
    /// `OPENAI_API_KEY` env var always wins over the file's key.
    pub async fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path()).await?;
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            config.remote.api_key = key.trim().to_string();
        }
        Ok(config)
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_remote_without_a_key() {
        let config = AppConfig::default();
        assert!(config.remote.enabled);
        assert_eq!(config.remote.api_key, "");
        assert_eq!(config.remote.model, "gpt-4o-mini");
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert!((config.remote.temperature - 0.7).abs() < f32::EPSILON);
        assert!(!config.remote.remote_ready());
    }

    #[test]
    fn key_must_look_like_a_secret_key() {
        assert!(is_plausible_key("sk-abc123"));
        assert!(is_plausible_key("  sk-abc123  "));
        assert!(!is_plausible_key(""));
        assert!(!is_plausible_key("hunter2"));
        assert!(!is_plausible_key("pk-abc123"));
    }

    #[test]
    fn disabled_remote_is_never_ready() {
        let remote = RemoteSettings {
            enabled: false,
            api_key: "sk-abc123".to_string(),
            ..RemoteSettings::default()
        };
        assert!(!remote.remote_ready());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [remote]
            api_key = "sk-test"
            "#,
        )
        .unwrap();
        assert!(config.remote.enabled);
        assert_eq!(config.remote.api_key, "sk-test");
        assert_eq!(config.remote.model, "gpt-4o-mini");
        assert!(config.remote.remote_ready());
    }

    #[test]
    fn empty_toml_matches_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.remote.model, AppConfig::default().remote.model);
    }

    #[tokio::test]
    async fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml"))
            .await
            .unwrap();
        assert_eq!(config.remote.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn load_from_reads_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
            [remote]
            enabled = false
            api_key = "sk-live"
            base_url = "http://127.0.0.1:9/v1/chat/completions"
            model = "gpt-4o"
            temperature = 0.2
            "#,
        )
        .await
        .unwrap();
        let config = AppConfig::load_from(&path).await.unwrap();
        assert!(!config.remote.enabled);
        assert_eq!(config.remote.api_key, "sk-live");
        assert_eq!(config.remote.model, "gpt-4o");
        assert!((config.remote.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[remote\nenabled = yes").await.unwrap();
        assert!(AppConfig::load_from(&path).await.is_err());
    }
}
