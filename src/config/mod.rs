use crate::agents::{AgentMode, ModelCatalog};
use crate::core::error::SiakError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TEMPERATURE: f32 = 0.4;

fn default_true() -> bool {
    true
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    #[value(name = "openai")]
    OpenAI,
}

impl Provider {
    /// Provider-specific environment variable consulted after `API_KEY`.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }

    pub fn default_models(&self) -> ModelCatalog {
        match self {
            Provider::Gemini => ModelCatalog::default(),
            Provider::OpenAI => ModelCatalog {
                text: "gpt-4.1-mini".to_string(),
                vision: "gpt-4.1-mini".to_string(),
                reasoning: None,
            },
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub text_model: Option<String>,
    pub vision_model: Option<String>,
    pub reasoning_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub active_provider: Option<Provider>,
    #[serde(default)]
    pub providers: HashMap<Provider, ProviderConfig>,
    #[serde(default)]
    pub default_mode: AgentMode,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_true")]
    pub welcome: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_provider: None,
            providers: HashMap::new(),
            default_mode: AgentMode::default(),
            temperature: DEFAULT_TEMPERATURE,
            request_timeout_secs: None,
            welcome: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".siak")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn log_dir() -> PathBuf {
        std::env::var_os("SIAK_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::config_dir().join("logs"))
    }

    pub fn history_path() -> PathBuf {
        Self::config_dir().join("input_history.txt")
    }

    /// Loads `~/.siak/config.yaml`, writing a default file on first run.
    pub fn load() -> Result<Config, SiakError> {
        let path = Self::config_path();
        if path.exists() {
            return Self::load_from(&path);
        }

        let config = Config::default();
        let _ = config.save_to(&path);
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Config, SiakError> {
        let contents = fs::read_to_string(path)?;
        serde_yml::from_str::<Config>(&contents)
            .map_err(|e| SiakError::Config(format!("Parse {}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SiakError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yml::to_string(self)?;
        fs::write(path, yaml_content)?;
        Ok(())
    }

    pub fn provider(&self) -> Provider {
        self.active_provider.unwrap_or_default()
    }

    pub fn provider_config(&self, provider: Provider) -> ProviderConfig {
        self.providers.get(&provider).cloned().unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Credential lookup: explicit value, then `API_KEY`, then the
    /// provider's own variable, then the config file. Blank values are ignored.
    pub fn resolve_api_key(
        &self,
        provider: Provider,
        explicit: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let usable = |value: Option<String>| value.filter(|key| !key.trim().is_empty());

        usable(explicit)
            .or_else(|| usable(env("API_KEY")))
            .or_else(|| usable(env(provider.api_key_env())))
            .or_else(|| usable(self.provider_config(provider).api_key))
    }

    /// Provider defaults overlaid with configured model names.
    pub fn model_catalog(&self, provider: Provider) -> ModelCatalog {
        let defaults = provider.default_models();
        let configured = self.provider_config(provider);
        ModelCatalog {
            text: configured.text_model.unwrap_or(defaults.text),
            vision: configured.vision_model.unwrap_or(defaults.vision),
            reasoning: configured.reasoning_model.or(defaults.reasoning),
        }
    }
}
