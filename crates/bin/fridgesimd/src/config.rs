//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `fridgesim.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::collections::BTreeMap;

use fridgesim_domain::catalog::DEFAULT_STAGE_DELAY_MS;
use fridgesim_domain::command::FlowDirective;
use fridgesim_domain::problem::RequestPolicy;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP/WebSocket listener settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Script timing and request policy.
    pub script: ScriptConfig,
    /// Flow directive overrides, keyed by command name.
    pub flow: BTreeMap<String, FlowDirective>,
}

/// Listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Spacing between staged events, in milliseconds.
    pub stage_delay_ms: u64,
    /// Block requests on any missing field instead of only a missing command.
    pub strict: bool,
}

impl ScriptConfig {
    #[must_use]
    pub fn policy(&self) -> RequestPolicy {
        if self.strict {
            RequestPolicy::Strict
        } else {
            RequestPolicy::Lenient
        }
    }
}

impl Config {
    /// Load configuration from `fridgesim.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("fridgesim.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("FRIDGESIM_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("FRIDGESIM_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("FRIDGESIM_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(delay) = var("FRIDGESIM_STAGE_DELAY_MS").and_then(|val| val.parse().ok()) {
            self.script.stage_delay_ms = delay;
        }
        if let Some(val) = var("FRIDGESIM_STRICT") {
            self.script.strict = matches!(val.trim(), "1" | "true" | "yes");
        }
        if let Some(val) = var("FRIDGESIM_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "fridgesimd=info,fridgesim_app=debug,fridgesim_adapter_http_axum=info,tower_http=debug"
                .to_string(),
        }
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            stage_delay_ms: DEFAULT_STAGE_DELAY_MS,
            strict: false,
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
