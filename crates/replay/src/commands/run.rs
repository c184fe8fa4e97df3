//! Replay a log and print the fingerprint.

use anyhow::Result;
use clap::Parser;
use console::style;
use tactics_core::{Fingerprint, replay};
use tracing::info;

use crate::input::RunInput;

/// Replay a log and print the resulting fingerprint
#[derive(Parser)]
pub struct Run {
    #[command(flatten)]
    input: RunInput,

    /// Print the canonical fingerprint JSON instead of a summary
    #[arg(long)]
    json: bool,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let (engine, initial, log) = self.input.load()?;
        let state = replay(&engine, &initial, &log);
        let fingerprint = Fingerprint::of(&state);
        let digest = fingerprint.digest()?;
        info!(records = log.len(), %digest, "replay finished");

        if self.json {
            println!("{}", fingerprint.canonical_json()?);
            return Ok(());
        }

        println!("{} {}", style("Digest:").bold().cyan(), digest);
        println!("{} {:?}", style("Status:").bold().cyan(), state.status);
        println!(
            "{} {}/{} at ({}, {})",
            style("Player:").bold().cyan(),
            fingerprint.player.hp,
            fingerprint.player.max_hp,
            fingerprint.player.q,
            fingerprint.player.r
        );
        println!(
            "{} turn {}, floor {}, {} kills, {} draws",
            style("Run:").bold().cyan(),
            fingerprint.turn_number,
            fingerprint.floor,
            fingerprint.kill_count,
            fingerprint.rng_counter
        );
        for actor in &fingerprint.enemies {
            println!(
                "  #{:<3} {:<16} hp {:>3} at ({}, {})",
                actor.id, actor.name, actor.hp, actor.q, actor.r
            );
        }
        Ok(())
    }
}
