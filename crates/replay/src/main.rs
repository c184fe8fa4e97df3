//! Action-log replay verifier.
//!
//! Rebuilds a run from its scenario file, replays a JSON action log through
//! the effect engine and reports (or checks) the resulting fingerprint.
//! Run with: `tactics-replay <command>`

mod commands;
mod input;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Run, Verify};
use tracing_subscriber::EnvFilter;

/// Deterministic replay tools for tactics runs
#[derive(Parser)]
#[command(name = "tactics-replay")]
#[command(about = "Replay and verify tactics action logs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay a log and print the resulting fingerprint
    Run(Run),

    /// Replay a log and check it against a claimed digest
    Verify(Verify),

    /// Summarize an action log without replaying it
    Inspect(Inspect),
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Verify(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn setup_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
