//! StackQuery Serve Library
//!
//! HTTP interface for StackQuery: paginated full-text search and question
//! listing over a question/answer corpus.

use stackquery_core::config::StackQueryConfig;
use stackquery_core::search::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use url::Url;

pub mod api;
pub mod handlers;
pub mod links;
pub mod middleware;
pub mod search;
pub mod server;

pub use handlers::*;
pub use server::*;

/// Server version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub cors_enabled: bool,
    pub max_request_size: usize,
    /// Externally visible base URL used for navigation links
    pub public_base_url: Option<Url>,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub source_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&StackQueryConfig::default())
    }
}

impl From<&StackQueryConfig> for ServerConfig {
    fn from(config: &StackQueryConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            database_url: config.database.url.clone(),
            max_connections: config.database.max_connections,
            acquire_timeout_seconds: config.database.acquire_timeout_seconds,
            cors_enabled: config.server.cors_enabled,
            max_request_size: config.server.max_request_size,
            public_base_url: config.server.public_base_url.clone(),
            default_page_size: config.search.default_page_size,
            max_page_size: config.search.max_page_size,
            source_timeout_ms: config.search.source_timeout_ms,
        }
    }
}

impl ServerConfig {
    /// Page size used when a request does not carry one
    pub fn effective_default_page_size(&self) -> u32 {
        match self.default_page_size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(self.max_page_size).min(MAX_PAGE_SIZE),
        }
    }
}
