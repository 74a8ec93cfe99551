use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_CAMPUSDESK_CONFIG: &str = "CAMPUSDESK_CONFIG";
pub const ENV_BACKEND_URL: &str = "CAMPUSDESK_BACKEND_URL";
pub const ENV_SESSION_PATH: &str = "CAMPUSDESK_SESSION_PATH";
pub const ENV_LOG_PATH: &str = "CAMPUSDESK_LOG_PATH";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CAMPUSDESK_REQUEST_TIMEOUT_SECS";

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_SESSION_PATH: &str = "./campusdesk-session.json";
const DEFAULT_LOG_PATH: &str = "./campusdesk.log";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Message(String),
}

impl ConfigError {
    fn configuration(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampusdeskConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_session_path")]
    pub session_path: String,
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CampusdeskConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            session_path: default_session_path(),
            log_path: default_log_path(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_owned()
}

fn default_session_path() -> String {
    DEFAULT_SESSION_PATH.to_owned()
}

fn default_log_path() -> String {
    DEFAULT_LOG_PATH.to_owned()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Values picked up from the process environment; each one overrides the
/// matching config-file field when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub backend_url: Option<String>,
    pub session_path: Option<String>,
    pub log_path: Option<String>,
    pub request_timeout_secs: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            backend_url: std::env::var(ENV_BACKEND_URL).ok(),
            session_path: std::env::var(ENV_SESSION_PATH).ok(),
            log_path: std::env::var(ENV_LOG_PATH).ok(),
            request_timeout_secs: std::env::var(ENV_REQUEST_TIMEOUT_SECS).ok(),
        }
    }
}

impl CampusdeskConfig {
    /// Load from the file named by `CAMPUSDESK_CONFIG` (defaults apply when
    /// unset), then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(ENV_CAMPUSDESK_CONFIG) {
            Ok(path) => Self::from_path(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(EnvOverrides::from_env())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|error| {
            ConfigError::configuration(format!(
                "failed to read config file '{}': {error}",
                path.display()
            ))
        })?;
        toml::from_str(&raw).map_err(|error| {
            ConfigError::configuration(format!(
                "failed to parse config file '{}': {error}",
                path.display()
            ))
        })
    }

    pub fn apply_overrides(&mut self, overrides: EnvOverrides) -> Result<(), ConfigError> {
        if let Some(backend_url) = overrides.backend_url {
            self.backend_url = backend_url;
        }
        if let Some(session_path) = overrides.session_path {
            self.session_path = session_path;
        }
        if let Some(log_path) = overrides.log_path {
            self.log_path = log_path;
        }
        if let Some(raw) = overrides.request_timeout_secs {
            self.request_timeout_secs = raw.parse().map_err(|_| {
                ConfigError::configuration(format!(
                    "{ENV_REQUEST_TIMEOUT_SECS} must be a positive integer, got '{raw}'"
                ))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::configuration(
                "backend_url must not be empty".to_owned(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::configuration(
                "request_timeout_secs must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}
