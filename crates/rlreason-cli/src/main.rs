//! rlreason CLI application
//!
//! Scores completions with the built-in reward functions, either one at a
//! time (`check`) or a whole JSON Lines batch against a reward config
//! (`score`).
//!
//! Logging goes to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) or pass
//! `--verbose` to see why candidates were rejected.

mod args;
mod commands;
mod router;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    router::route(cli)
}
