//! API configuration
//!
//! Values are layered: built-in defaults, then an optional `config/api.toml`,
//! then environment variables prefixed with `API_` (e.g. `API_PORT=9090`).

use serde::Deserialize;
use std::time::Duration;

use core_kernel::CoreError;
use infra_db::{DatabaseConfig, MappingPolicy};

/// Default location of the optional configuration file, without extension
pub const DEFAULT_CONFIG_FILE: &str = "config/api";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Path prefix for every route; `/` or empty serves at the root
    pub context_path: String,
    /// Database URL
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connect_timeout_secs: u64,
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    pub log_format: LogFormat,
    /// Answer 201 with the submitted entity when a create fails
    pub mask_create_failures: bool,
    /// Fail rows with unconvertible columns instead of skipping the field
    pub strict_mapping: bool,
    /// Refuse to start without a reachable database
    pub require_database: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            context_path: "/api".to_string(),
            database_url: "postgres://localhost/catalog".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            mask_create_failures: true,
            strict_mapping: false,
            require_database: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `config/api.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration from the given file (if present) and the environment
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Checks the values that cannot be expressed through types
    ///
    /// # Errors
    ///
    /// `CoreError::Configuration` naming the first offending key
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.port == 0 {
            return Err(CoreError::configuration("port must be greater than zero"));
        }
        if !self.context_path.is_empty() && !self.context_path.starts_with('/') {
            return Err(CoreError::configuration(format!(
                "context_path must start with '/', got '{}'",
                self.context_path
            )));
        }
        if self.database_url.trim().is_empty() {
            return Err(CoreError::configuration("database_url must not be empty"));
        }
        if self.max_connections == 0 {
            return Err(CoreError::configuration("max_connections must be greater than zero"));
        }
        if self.min_connections > self.max_connections {
            return Err(CoreError::configuration(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the context path without a trailing slash; empty means the root
    pub fn route_prefix(&self) -> &str {
        self.context_path.trim_end_matches('/')
    }

    /// Returns the pool settings for the database layer
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
    }

    pub fn mapping_policy(&self) -> MappingPolicy {
        if self.strict_mapping {
            MappingPolicy::Strict
        } else {
            MappingPolicy::Lenient
        }
    }
}
