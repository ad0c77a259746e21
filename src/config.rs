use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use crate::models::BoostWeights;
use crate::services::anthropic::{AnthropicOptions, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scorer: ScorerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScorerSettings {
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScorerSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScorerSettings {
    pub fn to_options(&self) -> AnthropicOptions {
        AnthropicOptions {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_max_tokens() -> u32 { 1024 }
fn default_temperature() -> f64 { 0.2 }
fn default_timeout_secs() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default)]
    pub boost: BoostConfig,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            boost: BoostConfig::default(),
        }
    }
}

fn default_max_concurrency() -> usize { 1 }

#[derive(Debug, Clone, Deserialize)]
pub struct BoostConfig {
    #[serde(default = "default_interest_weight")]
    pub interests: u32,
    #[serde(default = "default_value_weight")]
    pub values: u32,
    #[serde(default = "default_goal_weight")]
    pub goals: u32,
    #[serde(default = "default_max_boost")]
    pub max_boost: u32,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            interests: default_interest_weight(),
            values: default_value_weight(),
            goals: default_goal_weight(),
            max_boost: default_max_boost(),
        }
    }
}

impl From<&BoostConfig> for BoostWeights {
    fn from(config: &BoostConfig) -> Self {
        Self {
            interests: config.interests,
            values: config.values,
            goals: config.goals,
            max_boost: config.max_boost,
        }
    }
}

fn default_interest_weight() -> u32 { 3 }
fn default_value_weight() -> u32 { 5 }
fn default_goal_weight() -> u32 { 7 }
fn default_max_boost() -> u32 { 20 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LOVE_MATCH)
    /// 5. ANTHROPIC_API_KEY and CLAUDE_MODEL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LOVE_MATCH__SCORER__MODEL -> scorer.model
            .add_source(env_source())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("LOVE_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the conventional Anthropic variables on top of the layered config
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = env::var("ANTHROPIC_API_KEY") {
        builder = builder.set_override("scorer.api_key", api_key)?;
    }
    if let Ok(model) = env::var("CLAUDE_MODEL") {
        builder = builder.set_override("scorer.model", model)?;
    }

    builder.build()
}
