//! Application Configuration
//!
//! Values are layered, later layers winning:
//! 1. built-in defaults
//! 2. a JSON profile file (`--config`, else `gravity.docker.json` inside a
//!    container, else `gravity.local.json`; a missing default profile is skipped)
//! 3. `GRAVITY_API_*` environment variables

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of every environment variable read by the API
pub const ENV_PREFIX: &str = "GRAVITY_API_";

/// Profile used on a developer machine
pub const LOCAL_PROFILE: &str = "gravity.local.json";

/// Profile used inside a container
pub const DOCKER_PROFILE: &str = "gravity.docker.json";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    MissingFile(PathBuf),

    #[error("invalid config: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("invalid app_host '{0}': expected host:port")]
    InvalidHost(String),

    #[error("response_size_limit must be > 0, got {0}")]
    InvalidLimit(i64),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Invalid(Box::new(err))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string (empty: libpq environment defaults)
    #[serde(default)]
    pub db_connection_string: String,

    /// Listen address (default: "0.0.0.0:3000")
    #[serde(default = "default_app_host")]
    pub app_host: String,

    /// Maximum and default page size (default: 100)
    #[serde(default = "default_response_size_limit")]
    pub response_size_limit: i64,

    /// Log filter directive when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_app_host() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_response_size_limit() -> i64 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_connection_string: String::new(),
            app_host: default_app_host(),
            response_size_limit: default_response_size_limit(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

/// True when running inside a Docker container
pub fn is_running_in_docker() -> bool {
    Path::new("/.dockerenv").exists()
}

impl AppConfig {
    /// Profile file to read: the explicit path, else the environment default
    pub fn profile_path(explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None if is_running_in_docker() => PathBuf::from(DOCKER_PROFILE),
            None => PathBuf::from(LOCAL_PROFILE),
        }
    }

    /// Load defaults, profile file and environment, then validate
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let profile = Self::profile_path(explicit);
        if explicit.is_some() && !profile.exists() {
            return Err(ConfigError::MissingFile(profile));
        }

        Self::from_figment(
            Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Json::file(&profile))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    /// Extract and validate from an assembled figment
    pub fn from_figment(figment: Figment) -> ConfigResult<Self> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        self.socket_addr()?;
        if self.response_size_limit <= 0 {
            return Err(ConfigError::InvalidLimit(self.response_size_limit));
        }
        Ok(())
    }

    /// Parsed listen address
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        self.app_host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.app_host.clone()))
    }
}
