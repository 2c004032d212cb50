use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ai::{CompletionError, OpenAiClient};

/// Environment variables consulted, in order, when no key is configured
const API_KEY_ENV_VARS: [&str; 2] = ["MAILMIND_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion API settings
    #[serde(default)]
    pub ai: AiConfig,
    /// Locations of the prompt and inbox documents
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Completion API configuration (any OpenAI-compatible endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key; falls back to MAILMIND_API_KEY, then OPENAI_API_KEY
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
    /// Maximum tokens per response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout; unset keeps the HTTP client's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_ai_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: None,
        }
    }
}

impl AiConfig {
    /// The configured key, or the first non-empty environment fallback
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), |name| std::env::var(name).ok())
    }

    pub fn build_client(&self) -> Result<OpenAiClient, CompletionError> {
        let api_key = self.api_key().ok_or(CompletionError::MissingApiKey)?;
        OpenAiClient::new(
            api_key,
            &self.base_url,
            self.model.clone(),
            self.max_tokens,
            self.timeout_secs.map(Duration::from_secs),
        )
    }
}

fn resolve_api_key(
    configured: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    configured
        .map(str::to_string)
        .into_iter()
        .chain(API_KEY_ENV_VARS.iter().filter_map(|name| env(name)))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbox_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub keybinding_mode: KeybindingMode,
    #[serde(default)]
    pub theme: ThemeVariant,
    /// Split pane ratio for list/detail views (30-70)
    #[serde(default = "default_split_ratio")]
    pub split_ratio: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            keybinding_mode: KeybindingMode::default(),
            theme: ThemeVariant::default(),
            split_ratio: default_split_ratio(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingMode {
    #[default]
    Vim,
    Arrows,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Modern,
    Dark,
    #[serde(rename = "high-contrast")]
    HighContrast,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_split_ratio() -> u16 {
    40
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mailmind");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dir = dirs::data_local_dir()
            .context("Could not find data directory")?
            .join("mailmind");
        Ok(dir)
    }

    pub fn prompts_path(&self) -> Result<PathBuf> {
        match &self.data.prompts_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("prompts.json")),
        }
    }

    pub fn inbox_path(&self) -> Result<PathBuf> {
        match &self.data.inbox_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("mock_inbox.json")),
        }
    }

    /// Load the config file; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(Self::config_dir()?)?;
        fs::create_dir_all(Self::data_dir()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [ai]
            api_key = "sk-local"
            base_url = "http://localhost:11434/v1"
            model = "llama3"
            timeout_secs = 30

            [data]
            prompts_path = "/tmp/prompts.json"

            [ui]
            keybinding_mode = "arrows"
            theme = "high-contrast"
            split_ratio = 55
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.ai.model, "llama3");
        assert_eq!(config.ai.max_tokens, 1024);
        assert_eq!(config.ai.timeout_secs, Some(30));
        assert_eq!(
            config.prompts_path().unwrap(),
            PathBuf::from("/tmp/prompts.json")
        );
        assert_eq!(config.data.inbox_path, None);
        assert_eq!(config.ui.keybinding_mode, KeybindingMode::Arrows);
        assert_eq!(config.ui.theme, ThemeVariant::HighContrast);
        assert_eq!(config.ui.split_ratio, 55);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.ai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ui.theme, ThemeVariant::Modern);
        assert_eq!(config.ui.split_ratio, 40);
    }

    #[test]
    fn test_missing_file_is_default_and_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mailmind").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        assert!(config.ai.api_key.is_none());

        config.ui.keybinding_mode = KeybindingMode::Arrows;
        config.save_to(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("api_key"));
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.ui.keybinding_mode, KeybindingMode::Arrows);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\nsplit_ratio = \"wide\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_api_key_resolution_order() {
        let env = |name: &str| match name {
            "MAILMIND_API_KEY" => Some("  ".to_string()),
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            _ => None,
        };

        assert_eq!(
            resolve_api_key(Some("sk-config"), env),
            Some("sk-config".to_string())
        );
        assert_eq!(resolve_api_key(Some(""), env), Some("sk-env".to_string()));
        assert_eq!(resolve_api_key(None, |_| None), None);
    }
}
