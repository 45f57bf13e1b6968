//! # Batch Orchestrator Module
//!
//! Sequences the whole compression run over the discovered files.
//!
//! ## Execution flow:
//! 1. **EnsureOutputDir**: create the output root (the only fatal step)
//! 2. **Discover**: find candidate files; zero files ends the run normally
//! 3. **Per file**: resolve output path → build command → invoke the
//!    external optimizer → measure sizes → accumulate stats
//! 4. **Report**: totals plus a success/failure banner
//!
//! ## Error handling:
//! - A per-file failure (non-zero exit, launch error, unreadable sizes) is
//!   logged, counted, and never stops the batch
//! - Only output-root creation failure aborts the whole run
//!
//! ## Concurrency:
//! Strictly sequential. Each invocation is awaited to completion before the
//! next file starts; the stats accumulator is owned by this loop alone, so
//! no locking exists anywhere. An optional per-file timeout guards against
//! a hung external process.
//!
//! ## Example:
//! ```rust,no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use glb_batch_optimizer::{Config, GlbOptimizer};
//!
//! let mut optimizer = GlbOptimizer::new(Config::default())?;
//! let stats = optimizer.run().await?;
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::{
    command::{CommandBuilder, Invocation},
    config::Config,
    discovery::{DiscoveredFile, FileDiscoverer},
    error::OptimizeError,
    path_resolver::PathResolver,
    progress::ProgressManager,
    stats::{format_size, BatchStats, CompressionResult},
};

/// Main batch compression orchestrator
pub struct GlbOptimizer {
    config: Config,
}

impl GlbOptimizer {
    /// Create a new orchestrator with a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the batch over every discovered file.
    ///
    /// Returns the final counters; at completion `processed == succeeded +
    /// failed` and `total == processed`.
    pub async fn run(&mut self) -> Result<BatchStats> {
        info!("Starting GLB batch compression");
        info!("Input directory: {}", self.config.input_dir.display());
        info!("Output directory: {}", self.config.output_dir.display());
        info!("Quality: {}", self.config.quality);

        self.ensure_output_dir().await?;

        let files = FileDiscoverer::discover(&self.config)?;

        let mut stats = BatchStats::new();
        stats.total = files.len();

        if files.is_empty() {
            info!("No GLB files found");
            return Ok(stats);
        }

        let input_root = self
            .config
            .input_dir
            .canonicalize()
            .unwrap_or_else(|_| self.config.input_dir.clone());

        let progress = ProgressManager::new(files.len() as u64);

        for file in files {
            let result = self.compress_file(&file, &input_root).await;

            if result.success {
                stats.add_success();
                progress.update(&format!(
                    "[OK] {}: {:.1}% saved",
                    file.relative_path.display(),
                    result.ratio
                ));
            } else {
                stats.add_failure();
                progress.update(&format!("[FAIL] {}", file.relative_path.display()));
            }
        }

        progress.finish(&stats.format_summary());
        self.report(&stats);

        Ok(stats)
    }

    /// Watch mode is not implemented; callers get a typed signal instead of
    /// a silent no-op.
    pub fn watch(&self) -> Result<()> {
        Err(OptimizeError::Unsupported(
            "watch mode is not implemented; run the batch manually on changes".to_string(),
        )
        .into())
    }

    /// Create the output root. Failure here is fatal for the whole run.
    async fn ensure_output_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "Failed to create output directory {}: {}",
                    self.config.output_dir.display(),
                    e
                )
            })?;
        debug!("Output directory ready: {}", self.config.output_dir.display());
        Ok(())
    }

    /// Compress one file. Every failure is captured in the result; this
    /// never bubbles an error up to the batch loop.
    async fn compress_file(&self, file: &DiscoveredFile, input_root: &Path) -> CompressionResult {
        let output_path =
            PathResolver::resolve(&file.absolute_path, input_root, &self.config.output_dir);

        if let Err(e) = PathResolver::ensure_parent_dirs(&output_path).await {
            error!("[FAIL] {}: {}", file.relative_path.display(), e);
            return CompressionResult::failure(file.clone(), e.to_string());
        }

        let invocation = CommandBuilder::build(&file.absolute_path, &output_path, &self.config);

        info!("Compressing: {}", file.relative_path.display());
        debug!("Running: {}", invocation);

        if let Err(e) = self.invoke(&invocation).await {
            error!("[FAIL] {}", file.relative_path.display());
            error!("   Error: {}", e);
            return CompressionResult::failure(file.clone(), e.to_string());
        }

        match self.measure(&file.absolute_path, &output_path).await {
            Ok((input_size, output_size)) => {
                let result = CompressionResult::success(file.clone(), input_size, output_size);
                info!("[OK] Compressed: {}", file.relative_path.display());
                info!("   Original: {}", format_size(input_size));
                info!("   Compressed: {}", format_size(output_size));
                info!("   Reduction: {:.1}%", result.ratio);
                result
            }
            Err(e) => {
                error!("[FAIL] {}: {}", file.relative_path.display(), e);
                CompressionResult::failure(file.clone(), e.to_string())
            }
        }
    }

    /// Invoke the external optimizer and wait for it to exit.
    async fn invoke(&self, invocation: &Invocation) -> Result<()> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = match self.config.timeout_secs {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), cmd.output())
                .await
                .map_err(|_| {
                    OptimizeError::Tool(format!("{} timed out after {}s", invocation.program, secs))
                })?,
            None => cmd.output().await,
        };

        let output = output.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OptimizeError::MissingDependency(format!(
                    "{} not found; install it and make sure it is on PATH",
                    invocation.program
                ))
            } else {
                OptimizeError::Tool(format!("failed to launch {}: {}", invocation.program, e))
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OptimizeError::Tool(format!(
                "{} exited with {}: {}",
                invocation.program,
                output.status,
                stderr.trim()
            ))
            .into());
        }

        Ok(())
    }

    /// Read both file sizes after a successful invocation. The output file
    /// missing despite a zero exit counts as a per-file failure.
    async fn measure(
        &self,
        input_path: &std::path::Path,
        output_path: &std::path::Path,
    ) -> Result<(u64, u64)> {
        let input_size = tokio::fs::metadata(input_path)
            .await
            .map_err(OptimizeError::Io)?
            .len();
        let output_size = tokio::fs::metadata(output_path)
            .await
            .map_err(OptimizeError::Io)?
            .len();
        Ok((input_size, output_size))
    }

    fn report(&self, stats: &BatchStats) {
        info!("=== Compression stats ===");
        info!("Total files: {}", stats.total);
        info!("Succeeded: {}", stats.succeeded);
        info!("Failed: {}", stats.failed);
        info!("Skipped: {}", stats.skipped);

        if stats.succeeded > 0 {
            info!(
                "Compression complete, files saved to {}",
                self.config.output_dir.display()
            );
        } else {
            warn!("No files were compressed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> Config {
        Config {
            input_dir: root.join("in"),
            output_dir: root.join("out"),
            ..Default::default()
        }
    }

    fn touch(path: &Path, content: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Stub optimizer that copies its input to its output, mimicking the
    /// real tool's `optimize <in> <out>` contract.
    #[cfg(unix)]
    fn write_stub(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("stub-optimizer.sh");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_zero_files_returns_zeroed_stats() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("in")).unwrap();

        let mut config = config_for(temp.path());
        // Never invoked, so a missing binary must not matter
        config.optimizer_bin = "definitely-not-installed".to_string();

        let stats = GlbOptimizer::new(config).unwrap().run().await.unwrap();
        assert_eq!(stats, BatchStats::default());
    }

    #[tokio::test]
    async fn test_uncreatable_output_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("in")).unwrap();
        // A plain file where the output directory should go
        fs::write(temp.path().join("out"), b"blocker").unwrap();

        let result = GlbOptimizer::new(config_for(temp.path())).unwrap().run().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_tool_counts_failures_but_completes() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("in/a.glb"), b"glTF-a");
        touch(&temp.path().join("in/sub/b.glb"), b"glTF-b");

        let mut config = config_for(temp.path());
        config.optimizer_bin = "definitely-not-installed".to_string();

        let stats = GlbOptimizer::new(config).unwrap().run().await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.succeeded, 0);
        assert_eq!(stats.failed, 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_batch_mirrors_tree() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("in/a.glb"), b"glTF-aaaaaaaa");
        touch(&temp.path().join("in/sub/b.glb"), b"glTF-bbbbbbbb");

        let mut config = config_for(temp.path());
        // $1 is "optimize", $2 the input, $3 the output
        config.optimizer_bin = write_stub(temp.path(), "cp \"$2\" \"$3\"")
            .to_string_lossy()
            .into_owned();

        let stats = GlbOptimizer::new(config).unwrap().run().await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.processed, stats.succeeded + stats.failed);

        // Output tree mirrors the input tree
        assert!(temp.path().join("out/a.glb").is_file());
        assert!(temp.path().join("out/sub/b.glb").is_file());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_partial_failure_does_not_abort_batch() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("in/bad.glb"), b"glTF-bad");
        touch(&temp.path().join("in/good.glb"), b"glTF-good");

        let mut config = config_for(temp.path());
        // Fails on bad.glb, copies everything else
        config.optimizer_bin = write_stub(
            temp.path(),
            "case \"$2\" in *bad.glb) exit 1;; esac\ncp \"$2\" \"$3\"",
        )
        .to_string_lossy()
        .into_owned();

        let stats = GlbOptimizer::new(config).unwrap().run().await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 1);
        assert!(temp.path().join("out/good.glb").is_file());
        assert!(!temp.path().join("out/bad.glb").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_without_output_file_is_a_failure() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("in/a.glb"), b"glTF-a");

        let mut config = config_for(temp.path());
        // Exits 0 but never writes the output file
        config.optimizer_bin = write_stub(temp.path(), "exit 0")
            .to_string_lossy()
            .into_owned();

        let stats = GlbOptimizer::new(config).unwrap().run().await.unwrap();
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.succeeded, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hung_tool_hits_timeout() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("in/a.glb"), b"glTF-a");

        let mut config = config_for(temp.path());
        config.optimizer_bin = write_stub(temp.path(), "sleep 30")
            .to_string_lossy()
            .into_owned();
        config.timeout_secs = Some(1);

        let stats = GlbOptimizer::new(config).unwrap().run().await.unwrap();
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.processed, 1);
    }

    #[tokio::test]
    async fn test_watch_is_unsupported() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("in")).unwrap();

        let optimizer = GlbOptimizer::new(config_for(temp.path())).unwrap();
        let err = optimizer.watch().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OptimizeError>(),
            Some(OptimizeError::Unsupported(_))
        ));
    }
}
