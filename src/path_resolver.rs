//! # Path Resolution Module
//!
//! Centralizes output path computation so the output tree always mirrors
//! the input tree.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Computes output locations for discovered input files
pub struct PathResolver;

impl PathResolver {
    /// Map an input file to its location under the output root.
    ///
    /// The result is `output_root` joined with the input path relative to
    /// `input_root`, preserving subdirectory nesting. If the prefix does
    /// not strip (file outside the root), the bare file name is used.
    pub fn resolve(input_path: &Path, input_root: &Path, output_root: &Path) -> PathBuf {
        let relative = match input_path.strip_prefix(input_root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => {
                debug!(
                    "Strip prefix failed for {} - falling back to file name",
                    input_path.display()
                );
                input_path
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| input_path.to_path_buf())
            }
        };

        output_root.join(relative)
    }

    /// Create the parent directory chain for a path about to be written
    pub async fn ensure_parent_dirs(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                anyhow::anyhow!(
                    "Failed to create parent directories for {}: {}",
                    path.display(),
                    e
                )
            })?;
        }
        Ok(())
    }
}
