mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::PulsoError;
use defaults::*;

/// Environment variable that overrides `server.port`.
pub const ENV_PORT: &str = "PORT";
/// Environment variable that overrides `provider.api_key`.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable that overrides `provider.model`.
pub const ENV_MODEL: &str = "OPENAI_MODEL";
/// Environment variable that overrides `provider.base_url`.
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";

/// Top-level Pulso configuration.
///
/// Built once at startup and handed to the gateway; business logic never
/// reads the environment directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub coach: CoachConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// OpenAI-compatible completion API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Empty = no credential; every request takes the offline fallback path.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after a connect/timeout failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ProviderConfig {
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Coaching defaults used when the profile or the model leave gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Coach persona name used in the system prompt.
    #[serde(default = "default_coach_name")]
    pub name: String,
    #[serde(default = "default_training_days")]
    pub default_training_days: u8,
    /// Last link of the per-day duration fallback chain.
    #[serde(default = "default_session_minutes")]
    pub default_session_minutes: u32,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            name: default_coach_name(),
            default_training_days: default_training_days(),
            default_session_minutes: default_session_minutes(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for a daily-rolling log file. Unset = stderr only.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Apply environment overrides through `lookup` (injectable for tests).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => warn!("ignoring invalid {ENV_PORT}={port:?}"),
            }
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.provider.api_key = key.trim().to_string();
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            self.provider.model = model.trim().to_string();
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.provider.base_url = url.trim().to_string();
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, PulsoError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| PulsoError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, PulsoError> {
    let config: Config = toml::from_str(content)
        .map_err(|e| PulsoError::Config(format!("failed to parse config: {}", e)))?;

    if !(1..=7).contains(&config.coach.default_training_days) {
        return Err(PulsoError::Config(format!(
            "coach.default_training_days must be between 1 and 7, got {}",
            config.coach.default_training_days
        )));
    }

    Ok(config)
}
