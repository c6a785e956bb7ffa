//! Logging infrastructure for StackQuery
//!
//! This module provides centralized logging configuration and utilities
//! using the tracing ecosystem.

use stackquery_core::config::LoggingConfig;
use stackquery_core::{Result, StackQueryError};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Per-crate level caps added on top of the chosen level
const QUIET_TARGETS: [&str; 4] = ["hyper=warn", "h2=warn", "sqlx=warn", "tower_http=info"];

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to use JSON format
    pub json_format: bool,
    /// Whether to include timestamps
    pub with_timestamps: bool,
    /// Whether to include file/line information
    pub with_file_info: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_timestamps: true,
            with_file_info: false,
        }
    }
}

impl From<&LoggingConfig> for LoggerConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            json_format: config.json,
            ..Self::default()
        }
    }
}

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<()> {
    let level = LogLevel::parse(&config.level)?;

    let mut env_filter = EnvFilter::from_default_env().add_directive(level.into());
    for target in QUIET_TARGETS {
        let directive = Directive::from_str(target).map_err(|e| {
            StackQueryError::config(format!("Invalid log directive '{}': {}", target, e))
        })?;
        env_filter = env_filter.add_directive(directive);
    }

    let fmt_layer = if config.json_format {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info)
            .boxed()
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info);

        if config.with_timestamps {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| StackQueryError::config(format!("Failed to initialize logger: {}", e)))?;

    tracing::info!("Logger initialized with level: {}", config.level);
    Ok(())
}

/// Initialize logger for testing (reduces noise)
pub fn init_test_logger() -> Result<()> {
    let config = LoggerConfig {
        level: "warn".to_string(),
        json_format: false,
        with_timestamps: false,
        with_file_info: false,
    };

    // Ignore errors if already initialized
    let _ = init_logger(config);
    Ok(())
}

/// Create a logger configuration from environment variables
///
/// Reads `STACKQUERY_LOG_LEVEL`, `STACKQUERY_LOG_JSON`,
/// `STACKQUERY_LOG_TIMESTAMPS` and `STACKQUERY_LOG_FILE_INFO`.
pub fn logger_config_from_env() -> LoggerConfig {
    apply_env(LoggerConfig::default())
}

/// Override fields of `config` with any `STACKQUERY_LOG_*` variables set
pub fn apply_env(mut config: LoggerConfig) -> LoggerConfig {
    if let Ok(level) = std::env::var("STACKQUERY_LOG_LEVEL") {
        config.level = level;
    }
    config.json_format = env_flag("STACKQUERY_LOG_JSON", config.json_format);
    config.with_timestamps = env_flag("STACKQUERY_LOG_TIMESTAMPS", config.with_timestamps);
    config.with_file_info = env_flag("STACKQUERY_LOG_FILE_INFO", config.with_file_info);
    config
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v.parse().unwrap_or(default))
        .unwrap_or(default)
}

/// Log level utilities
pub struct LogLevel;

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level: &str) -> Result<Level> {
        Level::from_str(level).map_err(|e| {
            StackQueryError::validation(format!("Invalid log level '{}': {}", level, e))
        })
    }

    /// Get all available log levels
    pub fn all_levels() -> Vec<&'static str> {
        vec!["trace", "debug", "info", "warn", "error"]
    }

    /// Check if a log level string is valid
    pub fn is_valid(level: &str) -> bool {
        Self::all_levels().contains(&level.to_lowercase().as_str())
    }
}
