//! Service configuration
//!
//! Load order:
//! 1. Built-in defaults
//! 2. Optional JSON file
//! 3. Environment overrides (`HOST`, `PORT`, `NOTION_DATABASE_ID`,
//!    `NOTION_SECRET`, `NOTION_API_URL`)
//! 4. Validation
//!
//! Credentials have no default. A configuration without them never validates.
//! [`ServiceConfig::load_offline`] skips the credential check for commands
//! that never reach the remote API.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Severity};
use crate::remote::RemoteConfig;
use crate::schema::PropertySchema;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("{0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for the HTTP server, the CLI and the remote client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Host to bind to (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Remote database id
    #[serde(default)]
    pub database_id: Option<String>,

    /// Remote API secret
    #[serde(default)]
    pub secret: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Value of the `Notion-Version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Nesting limit used when a request does not carry one
    #[serde(default = "default_max_nesting_level")]
    pub max_nesting_level: usize,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    #[serde(default)]
    pub schema: PropertySchema,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_base_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_api_version() -> String {
    "2022-06-28".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_nesting_level() -> usize {
    2
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_id: None,
            secret: None,
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            request_timeout_secs: default_request_timeout_secs(),
            max_nesting_level: default_max_nesting_level(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
            schema: PropertySchema::default(),
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Loads configuration using `env` to look up overrides
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_checked(path, env, true)
    }

    /// Loads configuration without requiring remote credentials
    pub fn load_offline(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_offline_with_env(path, |key| std::env::var(key).ok())
    }

    pub fn load_offline_with_env<F>(path: Option<&Path>, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_checked(path, env, false)
    }

    fn load_checked<F>(path: Option<&Path>, env: F, credentials: bool) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env(env)?;
        if credentials {
            config.validate()?;
        } else {
            config.validate_settings()?;
        }

        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("host", config.host.as_str()),
                ("port", config.port.to_string().as_str()),
                ("max_nesting_level", config.max_nesting_level.to_string().as_str()),
            ],
        );

        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_env<F>(&mut self, env: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = env("HOST") {
            self.host = host;
        }
        if let Some(port) = env("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid PORT: '{}'", port)))?;
        }
        if let Some(id) = env("NOTION_DATABASE_ID") {
            self.database_id = Some(id);
        }
        if let Some(secret) = env("NOTION_SECRET") {
            self.secret = Some(secret);
        }
        if let Some(url) = env("NOTION_API_URL") {
            self.api_base_url = url;
        }
        Ok(())
    }

    /// Validates the configuration, credentials included
    pub fn validate(&self) -> ConfigResult<()> {
        let missing = |value: &Option<String>| value.as_deref().map_or(true, str::is_empty);
        if missing(&self.database_id) || missing(&self.secret) {
            return Err(ConfigError::Invalid(
                "Must define NOTION_SECRET and NOTION_DATABASE_ID in env".to_string(),
            ));
        }

        self.validate_settings()
    }

    /// Validates everything except credentials
    pub fn validate_settings(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection settings for the remote client
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig {
            base_url: self.api_base_url.clone(),
            database_id: self.database_id.clone().unwrap_or_default(),
            secret: self.secret.clone().unwrap_or_default(),
            api_version: self.api_version.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
