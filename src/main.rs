//! # GLB Batch Optimizer - Main Entry Point
//!
//! ## Responsibilities:
//! - Command line parsing with `clap`
//! - Logging setup with `tracing`
//! - Building the `Config` and launching the orchestrator
//!
//! ## Execution flow:
//! 1. Parse CLI arguments (input/output dirs, quality, feature toggles)
//! 2. Configure logging (INFO, or DEBUG with --verbose)
//! 3. Validate that the input directory exists
//! 4. Build a `Config` and run `GlbOptimizer`
//!
//! ## Example usage:
//! ```bash
//! glb-optimizer --input ./assets --output ./dist --quality high
//! ```
//!
//! Exit code is 0 on normal completion, including zero-files-found and
//! all-files-failed runs; 1 only on a fatal setup error.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use glb_batch_optimizer::{Config, GlbOptimizer, Quality};

#[derive(Parser)]
#[command(name = "glb-optimizer")]
#[command(about = "Batch-compress GLB models via the gltf-transform CLI")]
struct Args {
    /// Directory scanned for GLB files
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Output directory (the input tree is mirrored under it)
    #[arg(short, long, default_value = "./compressed")]
    output: PathBuf,

    /// Glob pattern for candidate files
    #[arg(short, long, default_value = "**/*.glb")]
    pattern: String,

    /// Compression quality preset
    #[arg(short, long, value_enum, default_value_t = Quality::Medium)]
    quality: Quality,

    /// Disable Draco geometry compression
    #[arg(long)]
    no_draco: bool,

    /// Disable WebP texture compression
    #[arg(long)]
    no_texture: bool,

    /// Disable mesh simplification
    #[arg(long)]
    no_mesh: bool,

    /// Maximum texture dimension in pixels
    #[arg(long, default_value = "1024")]
    max_texture_size: u32,

    /// Per-file timeout in seconds for the external optimizer
    #[arg(long)]
    timeout: Option<u64>,

    /// External optimizer executable
    #[arg(long, default_value = "gltf-transform")]
    optimizer_bin: String,

    /// Watch mode (not yet supported)
    #[arg(short, long)]
    watch: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Validate arguments
    if !args.input.exists() {
        return Err(anyhow::anyhow!(
            "Input directory does not exist: {}",
            args.input.display()
        ));
    }

    let config = Config {
        input_dir: args.input,
        output_dir: args.output,
        pattern: args.pattern,
        quality: args.quality,
        draco: !args.no_draco,
        texture_compression: !args.no_texture,
        mesh_simplification: !args.no_mesh,
        max_texture_size: args.max_texture_size,
        optimizer_bin: args.optimizer_bin,
        timeout_secs: args.timeout,
    };

    let mut optimizer = GlbOptimizer::new(config)?;

    if args.watch {
        // Surface the unsupported capability instead of silently ignoring
        // the flag, but still exit normally.
        if let Err(e) = optimizer.watch() {
            info!("{}", e);
        }
        return Ok(());
    }

    optimizer.run().await?;

    Ok(())
}
