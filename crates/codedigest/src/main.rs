use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod discovery;

#[derive(Parser)]
#[command(name = "codedigest")]
#[command(version, about = "Structural code digests: signatures, imports and comments without the bodies")]
struct Cli {
    /// File or directory to digest
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Print one JSON object per file instead of plain text
    #[arg(long)]
    json: bool,

    /// Upper bound on worker threads (default: available parallelism)
    #[arg(short = 'w', long)]
    max_workers: Option<usize>,

    /// Also emit files without a grammar, unchanged
    #[arg(short, long)]
    all: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging (RUST_LOG wins over --verbose)
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    commands::digest(
        &cli.path,
        &commands::DigestOptions {
            json: cli.json,
            max_workers: cli.max_workers,
            include_unsupported: cli.all,
        },
    )
}
