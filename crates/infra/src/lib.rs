//! StackQuery Infrastructure Library
//!
//! Process-level services shared by the server and the CLI. Currently this
//! is the tracing subscriber setup.

pub mod logger;

pub use logger::*;

/// Infrastructure version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
