//! Configuration types for StackQuery

use crate::{Result, StackQueryError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackQueryConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Search engine settings
    #[serde(default)]
    pub search: SearchSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether to add permissive CORS headers
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    /// Maximum request body size in bytes
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
    /// Externally visible base URL used for navigation links
    #[serde(default)]
    pub public_base_url: Option<Url>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            max_request_size: default_max_request_size(),
            public_base_url: None,
        }
    }
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (postgres://...)
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
        }
    }
}

/// Search engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Page size used when the caller does not pass one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound page sizes are clamped to
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Budget for a single call into the result source, in milliseconds
    #[serde(default = "default_source_timeout")]
    pub source_timeout_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            source_timeout_ms: default_source_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl StackQueryConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // Try YAML first, then JSON
        match serde_yaml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(_) => {
                let config = serde_json::from_str(&content)?;
                Ok(config)
            }
        }
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overlay `STACKQUERY_*` environment variables on top of file values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("STACKQUERY_DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(host) = std::env::var("STACKQUERY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("STACKQUERY_PORT") {
            self.server.port = port.parse().map_err(|e| {
                StackQueryError::config(format!("Invalid STACKQUERY_PORT '{}': {}", port, e))
            })?;
        }
        if let Ok(public) = std::env::var("STACKQUERY_PUBLIC_URL") {
            self.server.public_base_url = Some(Url::parse(&public)?);
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(StackQueryError::validation("Port cannot be 0"));
        }

        if let Some(ref base) = self.server.public_base_url {
            if base.scheme() != "http" && base.scheme() != "https" {
                return Err(StackQueryError::validation(
                    "Public base URL must use http or https scheme",
                ));
            }
        }

        if !self.database.url.starts_with("postgres://")
            && !self.database.url.starts_with("postgresql://")
        {
            return Err(StackQueryError::validation(
                "Database URL must use the postgres:// scheme",
            ));
        }

        if self.database.max_connections == 0 {
            return Err(StackQueryError::validation(
                "max_connections must be greater than 0",
            ));
        }

        if self.search.max_page_size == 0 {
            return Err(StackQueryError::validation(
                "max_page_size must be greater than 0",
            ));
        }

        if self.search.default_page_size == 0
            || self.search.default_page_size > self.search.max_page_size
        {
            return Err(StackQueryError::validation(format!(
                "default_page_size must be between 1 and {}",
                self.search.max_page_size
            )));
        }

        Ok(())
    }
}

// Default value functions
fn default_true() -> bool {
    true
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_max_request_size() -> usize {
    1024 * 1024
}
fn default_database_url() -> String {
    "postgresql://localhost/stackoverflow".to_string()
}
fn default_max_connections() -> u32 {
    10
}
fn default_acquire_timeout() -> u64 {
    5
}
fn default_page_size() -> u32 {
    crate::search::DEFAULT_PAGE_SIZE
}
fn default_max_page_size() -> u32 {
    crate::search::MAX_PAGE_SIZE
}
fn default_source_timeout() -> u64 {
    10_000
}
fn default_log_level() -> String {
    "info".to_string()
}
