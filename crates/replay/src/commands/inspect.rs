//! Summarize an action log.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use tactics_core::{EffectKind, compute_log_root};

use crate::input::read_log;

/// Summarize an action log without replaying it
#[derive(Parser)]
pub struct Inspect {
    /// JSON action log
    #[arg(value_name = "FILE")]
    log: PathBuf,

    /// List every record instead of the per-kind tally
    #[arg(long)]
    list: bool,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let log = read_log(&self.log)?;

        println!("{} {}", style("Log:").bold().cyan(), self.log.display());
        println!("{} {}", style("Records:").bold().cyan(), log.len());
        println!(
            "{} {}",
            style("Turns:").bold().cyan(),
            log.iter().filter(|r| r.consumes_turn).count()
        );
        println!(
            "{} {}",
            style("Log root:").bold().cyan(),
            hex::encode(compute_log_root(&log)?)
        );

        if self.list {
            for (index, record) in log.iter().enumerate() {
                let step = record.context.step_id.as_deref().unwrap_or("-");
                let kinds: Vec<String> = record.effects.iter().map(|e| e.kind().to_string()).collect();
                println!("  [{index:>4}] {step:<12} {}", kinds.join(", "));
            }
            return Ok(());
        }

        let mut tally: BTreeMap<EffectKind, usize> = BTreeMap::new();
        for effect in log.iter().flat_map(|r| r.effects.iter()) {
            *tally.entry(effect.kind()).or_default() += 1;
        }
        println!("\n{}", style("Effects by kind:").bold());
        for (kind, count) in tally {
            println!("  {:<24} {count}", kind.to_string());
        }
        Ok(())
    }
}
