// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eckwerk: find the corners of a photographed document, or crop it upright.

use clap::{Parser, Subcommand};
use eckwerk_core::error::Result;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{DetectCommand, RectifyCommand};

#[derive(Parser)]
#[command(
    name = "eckwerk",
    version,
    about = "Document corner detection from Hough lines",
    after_help = "EXAMPLES:\n  \
                  eckwerk detect photo.jpg\n  \
                  eckwerk detect photo.jpg --report report.json --overlay debug.png\n  \
                  eckwerk rectify photo.jpg --output page.png\n  \
                  eckwerk config > detector.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect document corners and print them as JSON
    Detect(DetectCommand),

    /// Detect corners and write the perspective-corrected page
    Rectify(RectifyCommand),

    /// Print the default detector configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Detect(cmd) => cmd.execute().await,
        Commands::Rectify(cmd) => cmd.execute().await,
        Commands::Config => commands::print_default_config(),
    }
}
