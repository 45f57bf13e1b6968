//! # GLB Batch Optimizer Library
//!
//! Library entry point exposing the public API of the batch compressor.
//!
//! ## Responsibilities:
//! - Defines the modular structure of the application
//! - Re-exports the main types for main.rs and other consumers
//!
//! ## Module architecture:
//! - `config`: Configuration, quality presets and parameter validation
//! - `error`: Custom error types for the different failure categories
//! - `discovery`: Glob-based discovery of candidate GLB files
//! - `path_resolver`: Output path mirroring and directory creation
//! - `command`: Construction of the external optimizer invocation
//! - `stats`: Batch statistics and per-file compression results
//! - `progress`: Progress bar feedback during the batch loop
//! - `optimizer`: Main orchestrator of the batch process
//!
//! ## Usage:
//! ```rust,no_run
//! use glb_batch_optimizer::{Config, GlbOptimizer};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::default();
//! let mut optimizer = GlbOptimizer::new(config)?;
//! let stats = optimizer.run().await?;
//! println!("{} of {} files compressed", stats.succeeded, stats.total);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod optimizer;
pub mod path_resolver;
pub mod progress;
pub mod stats;

pub use command::{CommandBuilder, Invocation};
pub use config::{Config, Quality, QualityPreset};
pub use discovery::{DiscoveredFile, FileDiscoverer};
pub use error::OptimizeError;
pub use optimizer::GlbOptimizer;
pub use stats::{BatchStats, CompressionResult};
