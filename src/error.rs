//! # Error Types Module
//!
//! Custom error types for the batch compressor.
//!
//! ## Error categories:
//! - `Io`: filesystem errors (missing files, permissions, etc.)
//! - `Discovery`: a glob pattern failed to evaluate
//! - `Tool`: the external optimizer exited non-zero or could not be launched
//! - `MissingDependency`: the external optimizer binary is not available
//! - `Validation`: invalid configuration values
//! - `Unsupported`: a requested capability is not implemented (watch mode)
//!
//! Only setup-phase errors are fatal for a whole run; per-file `Tool` and
//! `Io` errors are counted and the batch continues. `Discovery` errors are
//! logged as warnings and never escalate.

/// Custom error types for GLB batch compression
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Optimizer tool error: {0}")]
    Tool(String),

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported capability: {0}")]
    Unsupported(String),
}
