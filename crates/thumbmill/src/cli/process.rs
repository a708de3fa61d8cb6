//! The `thumbmill process` command: the intake boundary around the batch
//! driver.
//!
//! Size limits are enforced here, before the pipeline sees the file, so the
//! driver's contract stays exactly "missing file or unsupported extension".
//! One JSON report per input goes to stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use thumbmill_core::{
    parse_width_list, BatchDriver, BatchOutcome, Config, OutputFormat, OutputWriter, Quality,
};

/// Arguments for the `process` command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Source images to process
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Requested widths: a JSON array or comma-separated list. Non-numeric
    /// entries are dropped; entries below 100 are dropped silently. Empty
    /// means the configured defaults.
    #[arg(short, long)]
    pub widths: Option<String>,

    /// Encode quality, 1-100 (clamped). Defaults to the configured quality.
    #[arg(short, long)]
    pub quality: Option<i64>,

    /// Override the configured output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Pretty-print the JSON report (single input only)
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the process command.
pub fn execute(args: ProcessArgs, config: &Config) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(dir) = &args.output_dir {
        config.storage.output_dir = dir.to_string_lossy().into_owned();
    }

    let driver = BatchDriver::new(&config).context("failed to set up working directories")?;

    let quality = Quality::new(
        args.quality
            .unwrap_or(config.processing.default_quality as i64),
    );
    let widths = args.widths.as_deref().map(parse_width_list).unwrap_or_default();
    let max_bytes = config.limits.max_file_size_mb * 1024 * 1024;

    // One object for a single input, one object per line for several
    let format = if args.inputs.len() == 1 {
        OutputFormat::Json
    } else {
        OutputFormat::JsonLines
    };
    let stdout = std::io::stdout().lock();
    let mut writer = OutputWriter::new(stdout, format, args.pretty);

    for input in &args.inputs {
        let outcome = match oversize_error(input, max_bytes) {
            Some(reason) => {
                tracing::warn!(input = %input.display(), "rejected at intake: {reason}");
                rejected(input, reason)
            }
            None => driver.process(input, &widths, quality),
        };
        writer
            .write(&outcome.report())
            .context("failed to write report")?;
    }
    writer.flush()?;

    Ok(())
}

/// Intake-side size gate, mirroring what an upload handler enforces before
/// the pipeline is invoked.
fn oversize_error(input: &PathBuf, max_bytes: u64) -> Option<String> {
    let size = std::fs::metadata(input).map(|m| m.len()).ok()?;
    if size > max_bytes {
        Some(format!(
            "File exceeds maximum size: {size} bytes > {max_bytes} bytes"
        ))
    } else {
        None
    }
}

fn rejected(input: &PathBuf, reason: String) -> BatchOutcome {
    BatchOutcome {
        source: input.clone(),
        file_name: input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string(),
        original_size: 0,
        outcomes: Vec::new(),
        batch_error: Some(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversize_gate_fires_only_above_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.jpg");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        assert!(oversize_error(&path, 1024).is_some());
        assert!(oversize_error(&path, 4096).is_none());
        // Missing files are the driver's problem, not the gate's
        assert!(oversize_error(&dir.path().join("nope.jpg"), 1024).is_none());
    }

    #[test]
    fn rejected_outcome_reports_failure() {
        let outcome = rejected(&PathBuf::from("/tmp/big.jpg"), "too big".to_string());
        let report = outcome.report();
        assert!(!report.success);
        assert_eq!(report.file, "big.jpg");
        assert_eq!(report.errors, vec!["too big".to_string()]);
    }
}
