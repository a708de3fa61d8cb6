//! thumbmill CLI - Responsive thumbnail generation with age-based retention.
//!
//! thumbmill takes uploaded images and produces resized variants at standard
//! responsive widths, reporting each batch as a JSON object.
//!
//! # Usage
//!
//! ```bash
//! # Generate the default width set for one image
//! thumbmill process upload.jpg
//!
//! # Specific widths and quality
//! thumbmill process upload.jpg --widths "300,600,1200" --quality 70
//!
//! # Delete output files older than the retention window
//! thumbmill sweep
//!
//! # View configuration
//! thumbmill config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// thumbmill - responsive thumbnail generator with age-based output retention.
#[derive(Parser, Debug)]
#[command(name = "thumbmill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate thumbnails for one or more source images
    Process(cli::process::ProcessArgs),

    /// Delete output files older than the retention window
    Sweep(cli::sweep::SweepArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI overrides.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match thumbmill_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `thumbmill config path`."
            );
            thumbmill_core::Config::default()
        }
    };
    logging::init(&config, cli.verbose, cli.json_logs);

    tracing::debug!("thumbmill v{}", thumbmill_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Process(args) => cli::process::execute(args, &config),
        Commands::Sweep(args) => cli::sweep::execute(args, &config),
        Commands::Config(args) => cli::config::execute(args),
    }
}
