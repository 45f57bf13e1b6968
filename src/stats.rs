//! # Batch Statistics Module
//!
//! Counters for a batch run and the per-file compression result record.
//!
//! `BatchStats` is owned exclusively by the orchestrator and only ever
//! incremented from its sequential loop; at the end of a run
//! `processed == succeeded + failed` and `total == processed` hold.

use crate::discovery::DiscoveredFile;

/// Aggregate counters for one batch run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    pub fn add_failure(&mut self) {
        self.processed += 1;
        self.failed += 1;
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Total: {} | Succeeded: {} | Failed: {} | Skipped: {}",
            self.total, self.succeeded, self.failed, self.skipped
        )
    }
}

/// Outcome of compressing a single file
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub file: DiscoveredFile,
    pub success: bool,
    pub input_size: u64,
    pub output_size: u64,
    /// Size reduction as a percentage of the input size
    pub ratio: f64,
    pub error_message: Option<String>,
}

impl CompressionResult {
    pub fn success(file: DiscoveredFile, input_size: u64, output_size: u64) -> Self {
        Self {
            file,
            success: true,
            input_size,
            output_size,
            ratio: reduction_percent(input_size, output_size),
            error_message: None,
        }
    }

    pub fn failure(file: DiscoveredFile, error_message: String) -> Self {
        Self {
            file,
            success: false,
            input_size: 0,
            output_size: 0,
            ratio: 0.0,
            error_message: Some(error_message),
        }
    }
}

/// Percentage of bytes shaved off the input, `(1 - out/in) * 100`
pub fn reduction_percent(input_size: u64, output_size: u64) -> f64 {
    if input_size == 0 {
        0.0
    } else {
        (1.0 - output_size as f64 / input_size as f64) * 100.0
    }
}

/// Human-readable byte size in binary units, one decimal place
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;
    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.1} {}", size, UNITS[unit_index])
}
