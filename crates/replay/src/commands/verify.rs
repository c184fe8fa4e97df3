//! Check a submitted log against its claimed digest.

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use tactics_core::{GameError, ReplayError, verify_replay};
use tracing::warn;

use crate::input::RunInput;

/// Replay a log and check it against a claimed digest
#[derive(Parser)]
pub struct Verify {
    #[command(flatten)]
    input: RunInput,

    /// Expected fingerprint digest (hex SHA-256)
    #[arg(short, long, value_name = "DIGEST")]
    expect: String,
}

impl Verify {
    pub fn execute(self) -> Result<()> {
        let (engine, initial, log) = self.input.load()?;

        match verify_replay(&engine, &initial, &log, &self.expect) {
            Ok(fingerprint) => {
                println!(
                    "{} {} records, turn {}",
                    style("Verified:").bold().green(),
                    log.len(),
                    fingerprint.turn_number
                );
                Ok(())
            }
            Err(err @ ReplayError::FingerprintMismatch { .. }) => {
                warn!(code = err.error_code(), "replay rejected");
                println!("{} {}", style("Rejected:").bold().red(), err);
                bail!(err)
            }
            Err(err) => Err(err.into()),
        }
    }
}
