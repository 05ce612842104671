//! Merkle Orchard CLI: off-ledger tooling for channel owners.
//!
//! Subcommands: init, cumulative, tree, verify.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::OrchardConfig;

/// Merkle Orchard: cumulative Merkle payouts for NFT channels.
#[derive(Parser, Debug)]
#[command(name = "orchard", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "orchard.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Merge a period's payouts into the previous cumulative amounts.
    Cumulative(commands::cumulative::CumulativeArgs),
    /// Build the channel Merkle tree and write root and proofs.
    Tree(commands::tree::TreeArgs),
    /// Re-verify written proofs against the written root.
    Verify(commands::verify::VerifyArgs),
}

fn init_tracing(config: &OrchardConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = OrchardConfig::load(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_tracing(&config);

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Cumulative(args) => commands::cumulative::run(args).await,
        Commands::Tree(args) => commands::tree::run(args, &config.distribution).await,
        Commands::Verify(args) => commands::verify::run(args, &config.distribution).await,
    }
}
