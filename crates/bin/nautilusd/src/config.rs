//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `nautilus.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::Path;
use std::time::Duration;

use nautilus_app::actions::UnknownActionPolicy;
use nautilus_app::rule_engine::{EngineConfig, ExecutionMode};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule engine settings.
    pub engine: EngineSettings,
    /// Rules file settings.
    pub rules: RulesConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Rule engine tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// `sequential` or `concurrent` action scheduling within a rule.
    pub execution: ExecutionMode,
    /// Simulated latency added before every action, in milliseconds.
    pub action_delay_ms: u64,
    /// Deadline for all actions of one rule, in milliseconds. `0` disables it.
    pub rule_timeout_ms: u64,
    /// What to do with actions whose type has no handler.
    pub unknown_actions: UnknownActionPolicy,
    /// Maximum retained history entries. `0` keeps everything.
    pub history_capacity: usize,
}

/// Where rules are loaded from.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Path of the TOML rules file.
    pub path: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `nautilus.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if an
    /// override or the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("nautilus.toml")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("NAUTILUS_EXECUTION") {
            self.engine.execution = match val.as_str() {
                "sequential" => ExecutionMode::Sequential,
                "concurrent" => ExecutionMode::Concurrent,
                other => {
                    return Err(ConfigError::Validation(format!(
                        "unknown execution mode `{other}`"
                    )));
                }
            };
        }
        if let Some(val) = var("NAUTILUS_ACTION_DELAY_MS") {
            if let Ok(ms) = val.parse() {
                self.engine.action_delay_ms = ms;
            }
        }
        if let Some(val) = var("NAUTILUS_RULE_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.engine.rule_timeout_ms = ms;
            }
        }
        if let Some(val) = var("NAUTILUS_HISTORY_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                self.engine.history_capacity = capacity;
            }
        }
        if let Some(val) = var("NAUTILUS_RULES") {
            self.rules.path = val;
        }
        if let Some(val) = var("NAUTILUS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "rules path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Engine configuration derived from the `[engine]` section.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            execution: self.engine.execution,
            rule_timeout: (self.engine.rule_timeout_ms > 0)
                .then(|| Duration::from_millis(self.engine.rule_timeout_ms)),
        }
    }

    /// Simulated per-action latency.
    #[must_use]
    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.engine.action_delay_ms)
    }

    /// Path of the rules file.
    #[must_use]
    pub fn rules_path(&self) -> &Path {
        Path::new(&self.rules.path)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            execution: ExecutionMode::Sequential,
            action_delay_ms: 0,
            rule_timeout_ms: 0,
            unknown_actions: UnknownActionPolicy::Ignore,
            history_capacity: 0,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: "rules.toml".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "nautilusd=info,nautilus_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
