use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Generative-language backend used by the "ask the DJ" search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL; the request path is appended.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Optional TOML library replacing the built-in seed.
    #[serde(default = "default_catalog_toml")]
    pub catalog_toml: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the splash screen before the library view.
    #[serde(default = "default_show_splash")]
    pub show_splash: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_toml: default_catalog_toml(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_splash: default_show_splash(),
        }
    }
}

impl AssistantConfig {
    /// Resolve the API key from the environment.  Missing and blank values
    /// both come back as `None`.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_catalog_toml() -> PathBuf {
    platform::config_dir().join("catalog.toml")
}

fn default_show_splash() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.assistant.api_key_env, "API_KEY");
        assert_eq!(config.assistant.model, "gemini-3-flash-preview");
        assert!(config.assistant.endpoint.starts_with("https://"));
        assert_eq!(config.assistant.timeout_secs, 30);
        assert!(config.ui.show_splash);
        assert!(config
            .catalog
            .catalog_toml
            .ends_with("rhythmotune/catalog.toml"));
    }

    #[test]
    fn partial_file_keeps_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[assistant]\nmodel = \"gemini-2.0-flash\"\n\n[ui]\nshow_splash = false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.assistant.model, "gemini-2.0-flash");
        assert_eq!(config.assistant.api_key_env, "API_KEY");
        assert!(!config.ui.show_splash);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.assistant.timeout_secs = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.assistant.timeout_secs, 5);
        assert_eq!(loaded.catalog.catalog_toml, config.catalog.catalog_toml);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = AssistantConfig {
            api_key_env: "RHYTHMOTUNE_TEST_BLANK_KEY".to_string(),
            ..AssistantConfig::default()
        };
        std::env::set_var(&cfg.api_key_env, "   ");
        assert_eq!(cfg.resolve_api_key(), None);
        std::env::set_var(&cfg.api_key_env, "secret");
        assert_eq!(cfg.resolve_api_key().as_deref(), Some("secret"));
        std::env::remove_var(&cfg.api_key_env);
        assert_eq!(cfg.resolve_api_key(), None);
    }
}
