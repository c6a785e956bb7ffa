//! StackQuery Core Library
//!
//! Search dispatch and pagination engine for a question/answer corpus.
//! This library selects a ranking strategy from a caller-supplied method
//! token, runs it against a ranked result source, projects the results onto
//! one output shape and computes deterministic page navigation.

pub mod config;
pub mod error;
pub mod questions;
pub mod search;

// Re-export commonly used types
pub use config::StackQueryConfig;
pub use error::{ErrorCategory, Result, StackQueryError};
pub use questions::{
    list_questions, MemoryQuestionSource, PgQuestionSource, QuestionSource, QuestionSummary,
};
pub use search::{
    PageEnvelope, PageLinkBuilder, PagingInfo, RankedResult, RankedResultSource, SearchOrchestrator,
    SearchOutcome, SearchQuery, Strategy,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
