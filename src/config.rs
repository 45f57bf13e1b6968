//! # Configuration Management Module
//!
//! Holds every knob of the batch compressor in a single immutable struct.
//!
//! ## Responsibilities:
//! - Defines the `Config` struct with all batch parameters
//! - Defines the fixed `Quality` → `QualityPreset` lookup table
//! - Provides validation of input parameters
//! - Supports loading/saving configuration from/to JSON files
//! - Provides sensible defaults for all parameters
//!
//! ## Configuration parameters:
//! - `input_dir`: root directory scanned for GLB files (default: ".")
//! - `output_dir`: root of the mirrored output tree (default: "./compressed")
//! - `pattern`: glob pattern for candidate files (default: "**/*.glb")
//! - `quality`: quality preset, low/medium/high (default: medium)
//! - `draco`: enable Draco geometry compression (default: true)
//! - `texture_compression`: re-encode textures as WebP (default: true)
//! - `mesh_simplification`: enable mesh simplification (default: true)
//! - `max_texture_size`: maximum texture dimension in pixels (default: 1024)
//! - `optimizer_bin`: external optimizer executable (default: "gltf-transform")
//! - `timeout_secs`: optional per-file timeout for the external process
//!
//! ## Example:
//! ```rust
//! use glb_batch_optimizer::{Config, Quality};
//!
//! let config = Config {
//!     quality: Quality::High,
//!     max_texture_size: 2048,
//!     ..Default::default()
//! };
//! config.validate().unwrap();
//! ```

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::OptimizeError;

/// Named compression quality level
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Low => write!(f, "low"),
            Quality::Medium => write!(f, "medium"),
            Quality::High => write!(f, "high"),
        }
    }
}

/// Fixed parameter bundle behind a quality level.
///
/// Lower `compression_level` means less aggressive Draco quantization;
/// `simplify_ratio` is the fraction of geometry kept by mesh simplification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityPreset {
    pub compression_level: u8,
    pub max_texture_size: u32,
    pub simplify_ratio: f64,
}

impl Quality {
    /// Read-only preset lookup. The table is a process-wide constant.
    pub const fn preset(self) -> QualityPreset {
        match self {
            Quality::Low => QualityPreset {
                compression_level: 7,
                max_texture_size: 512,
                simplify_ratio: 0.5,
            },
            Quality::Medium => QualityPreset {
                compression_level: 5,
                max_texture_size: 1024,
                simplify_ratio: 0.8,
            },
            Quality::High => QualityPreset {
                compression_level: 3,
                max_texture_size: 2048,
                simplify_ratio: 0.9,
            },
        }
    }
}

/// Configuration for a batch compression run. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory scanned for GLB files
    pub input_dir: PathBuf,
    /// Root of the mirrored output tree
    pub output_dir: PathBuf,
    /// Glob pattern for candidate files
    pub pattern: String,
    /// Quality preset (low/medium/high)
    pub quality: Quality,
    /// Enable Draco geometry compression
    pub draco: bool,
    /// Re-encode textures as WebP
    pub texture_compression: bool,
    /// Enable mesh simplification
    pub mesh_simplification: bool,
    /// Maximum texture dimension in pixels
    pub max_texture_size: u32,
    /// External optimizer executable
    pub optimizer_bin: String,
    /// Optional per-file timeout in seconds for the external process
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("./compressed"),
            pattern: "**/*.glb".to_string(),
            quality: Quality::Medium,
            draco: true,
            texture_compression: true,
            mesh_simplification: true,
            max_texture_size: 1024,
            optimizer_bin: "gltf-transform".to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_texture_size == 0 {
            return Err(OptimizeError::Validation(
                "Max texture size must be greater than 0".to_string(),
            )
            .into());
        }

        if self.pattern.trim().is_empty() {
            return Err(
                OptimizeError::Validation("File pattern must not be empty".to_string()).into(),
            );
        }

        if self.optimizer_bin.trim().is_empty() {
            return Err(OptimizeError::Validation(
                "Optimizer executable must not be empty".to_string(),
            )
            .into());
        }

        if let Some(secs) = self.timeout_secs {
            if secs == 0 {
                return Err(OptimizeError::Validation(
                    "Timeout must be greater than 0 seconds".to_string(),
                )
                .into());
            }
        }

        Ok(())
    }

    /// Load configuration from a JSON file, falling back to defaults if absent
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
