//! Error handling for StackQuery core library

use thiserror::Error;

/// Result type alias for StackQuery operations
pub type Result<T> = std::result::Result<T, StackQueryError>;

/// Main error type for StackQuery operations
#[derive(Error, Debug)]
pub enum StackQueryError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database driver errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Caller input failed validation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Sort or order key the result source cannot honour
    #[error("Invalid sort parameter: {message}")]
    InvalidSort { message: String },

    /// The ranked result source failed or could not be reached
    #[error("Search unavailable: {message}")]
    SearchUnavailable { message: String },

    /// Network connectivity errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Timeout errors
    #[error("Operation timed out: {operation}")]
    Timeout { operation: String },

    /// Resource not found errors
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },
}

impl StackQueryError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an invalid sort error
    pub fn invalid_sort<S: Into<String>>(message: S) -> Self {
        Self::InvalidSort {
            message: message.into(),
        }
    }

    /// Create a search unavailable error
    pub fn search_unavailable<S: Into<String>>(message: S) -> Self {
        Self::SearchUnavailable {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(operation: S) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if error is retryable by the caller.
    ///
    /// The orchestrator itself never retries; this is advisory for clients
    /// of the source.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Database(err) => matches!(
                err,
                sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::PoolClosed
            ),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Database(_) => ErrorCategory::Database,
            Self::Json(_) | Self::Yaml(_) => ErrorCategory::Serialization,
            Self::Url(_) | Self::Config { .. } => ErrorCategory::Configuration,
            Self::Validation { .. } | Self::InvalidSort { .. } => ErrorCategory::Validation,
            Self::SearchUnavailable { .. } => ErrorCategory::Search,
            Self::Network { .. } => ErrorCategory::Network,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Generic(_) => ErrorCategory::Generic,
        }
    }
}

/// Error categories for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    FileSystem,
    Database,
    Serialization,
    Configuration,
    Validation,
    Search,
    Network,
    Timeout,
    NotFound,
    Generic,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FileSystem => "filesystem",
            Self::Database => "database",
            Self::Serialization => "serialization",
            Self::Configuration => "configuration",
            Self::Validation => "validation",
            Self::Search => "search",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::NotFound => "not_found",
            Self::Generic => "generic",
        };
        write!(f, "{}", name)
    }
}
