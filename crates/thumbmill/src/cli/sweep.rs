//! The `thumbmill sweep` command: age-based deletion over the output
//! directory.

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use thumbmill_core::Config;

/// Arguments for the `sweep` command.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Directory to sweep (defaults to the configured output directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Retention window in hours (defaults to the configured window)
    #[arg(long)]
    pub max_age_hours: Option<u64>,

    /// Report what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the sweep command.
pub fn execute(args: SweepArgs, config: &Config) -> anyhow::Result<()> {
    let dir = args.dir.unwrap_or_else(|| config.output_dir());
    let max_age = args
        .max_age_hours
        .map(|h| Duration::from_secs(h * 3600))
        .unwrap_or_else(|| config.retention_window());

    let stats = thumbmill_core::sweep(&dir, max_age, args.dry_run)?;

    let verb = if args.dry_run { "would delete" } else { "deleted" };
    println!(
        "{} {} file(s), retained {}, {} failure(s)",
        verb, stats.removed, stats.retained, stats.failed
    );
    Ok(())
}
