//! # File Discovery Module
//!
//! Finds candidate GLB files under the input root using glob patterns.
//!
//! ## Responsibilities:
//! - Applies two glob patterns: direct children and all nested descendants
//! - Excludes vendored trees (`node_modules`) and the output directory
//! - Merges pattern results and deduplicates by absolute path
//! - Sorts lexicographically so discovery order is deterministic
//! - Falls back to a flat scan of a `models/` subdirectory when nothing
//!   matched (best-effort heuristic, not a guarantee)
//!
//! ## Failure semantics:
//! - A failing glob pattern is logged as a warning and excluded; the other
//!   pattern is still evaluated
//! - A failure enumerating the fallback directory is logged and swallowed
//! - Discovery itself never aborts a run

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::OptimizeError;

/// Directory segment that marks vendored dependencies, never scanned.
const DEPENDENCY_DIR: &str = "node_modules";

/// Subdirectory probed when the glob patterns match nothing.
const FALLBACK_DIR: &str = "models";

/// A candidate input file located during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path on disk
    pub absolute_path: PathBuf,
    /// Path relative to the input root, reused to mirror the output tree
    pub relative_path: PathBuf,
}

/// Locates GLB files under the configured input root
pub struct FileDiscoverer;

impl FileDiscoverer {
    /// Find all candidate files under the input root.
    ///
    /// The same file matched by both patterns counts once; results are
    /// sorted by absolute path.
    pub fn discover(config: &Config) -> Result<Vec<DiscoveredFile>> {
        let input_root = config
            .input_dir
            .canonicalize()
            .unwrap_or_else(|_| config.input_dir.clone());

        let file_part = Self::pattern_file_part(&config.pattern);
        let patterns = [
            input_root.join(&file_part),
            input_root.join("**").join(&file_part),
        ];

        let output_segment = config
            .output_dir
            .file_name()
            .map(|s| s.to_string_lossy().into_owned());

        let mut merged: BTreeSet<PathBuf> = BTreeSet::new();
        for pattern in &patterns {
            let pattern_str = pattern.to_string_lossy();
            match glob::glob(&pattern_str) {
                Ok(paths) => {
                    for entry in paths {
                        match entry {
                            Ok(path) => {
                                if !path.is_file() {
                                    continue;
                                }
                                if Self::is_excluded(&path, &input_root, output_segment.as_deref())
                                {
                                    debug!("Excluded from discovery: {}", path.display());
                                    continue;
                                }
                                let absolute =
                                    path.canonicalize().unwrap_or_else(|_| path.clone());
                                merged.insert(absolute);
                            }
                            Err(e) => {
                                warn!("Unreadable entry for pattern \"{}\": {}", pattern_str, e)
                            }
                        }
                    }
                }
                Err(e) => {
                    let err = OptimizeError::Discovery(format!(
                        "pattern \"{}\" failed: {}",
                        pattern_str, e
                    ));
                    warn!("{}", err);
                }
            }
        }

        // Heuristic recovery: probe the conventional models/ directory when
        // the patterns matched nothing at all.
        if merged.is_empty() {
            info!("No files matched, checking {}/ directly...", FALLBACK_DIR);
            let extension = Self::pattern_extension(&file_part);
            for path in Self::scan_fallback_dir(&input_root, &extension) {
                merged.insert(path);
            }
        }

        let files: Vec<DiscoveredFile> = merged
            .into_iter()
            .map(|absolute_path| {
                let relative_path = absolute_path
                    .strip_prefix(&input_root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| absolute_path.clone());
                DiscoveredFile {
                    absolute_path,
                    relative_path,
                }
            })
            .collect();

        info!("Found {} GLB files", files.len());
        for file in &files {
            info!("   - {}", file.relative_path.display());
        }

        Ok(files)
    }

    /// Final path segment of the configured glob, e.g. "**/*.glb" -> "*.glb"
    fn pattern_file_part(pattern: &str) -> String {
        pattern
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("*.glb")
            .to_string()
    }

    /// Extension carried by the file part, e.g. "*.glb" -> "glb"
    fn pattern_extension(file_part: &str) -> String {
        file_part
            .rsplit('.')
            .next()
            .filter(|s| !s.is_empty() && !s.contains('*'))
            .unwrap_or("glb")
            .to_ascii_lowercase()
    }

    /// Check whether a matched path sits inside an excluded directory
    fn is_excluded(path: &Path, input_root: &Path, output_segment: Option<&str>) -> bool {
        let relative = path.strip_prefix(input_root).unwrap_or(path);
        relative.components().any(|c| match c {
            Component::Normal(name) => {
                let name = name.to_string_lossy();
                name == DEPENDENCY_DIR || output_segment == Some(name.as_ref())
            }
            _ => false,
        })
    }

    /// Non-recursive scan of `<input_root>/models` for matching files.
    /// Enumeration failures are logged and swallowed.
    fn scan_fallback_dir(input_root: &Path, extension: &str) -> Vec<PathBuf> {
        let fallback = input_root.join(FALLBACK_DIR);
        if !fallback.is_dir() {
            return Vec::new();
        }

        let entries = match std::fs::read_dir(&fallback) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not read {}: {}", fallback.display(), e);
                return Vec::new();
            }
        };

        let mut found = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let matches = path
                .extension()
                .map(|ext| ext.to_string_lossy().to_ascii_lowercase() == extension)
                .unwrap_or(false);
            if matches && path.is_file() {
                found.push(path.canonicalize().unwrap_or(path));
            }
        }
        found
    }
}
