//! Shared inputs: content directory, scenario and action log.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tactics_content::{AilmentLoader, ConfigLoader, ContentFactory, ScenarioLoader};
use tactics_core::{ActionRecord, EffectEngine, GameState, TileEffectRegistry};
use tracing::debug;

/// Arguments naming the run to rebuild.
#[derive(Args)]
pub struct RunInput {
    /// Scenario file describing the initial state
    #[arg(short, long, value_name = "FILE")]
    pub scenario: PathBuf,

    /// JSON action log to replay
    #[arg(short, long, value_name = "FILE")]
    pub log: PathBuf,

    /// Content directory holding config.toml and ailments.ron
    /// (defaults to the bundled content)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Ailment table overriding the content directory's
    #[arg(long, value_name = "FILE")]
    pub ailments: Option<PathBuf>,

    /// Engine config overriding the content directory's
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl RunInput {
    pub fn factory(&self) -> ContentFactory {
        match &self.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        }
    }

    fn engine(&self, factory: &ContentFactory) -> Result<EffectEngine> {
        if self.ailments.is_none() && self.config.is_none() {
            return factory.build_engine();
        }
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => factory.load_config()?,
        };
        let ailments = match &self.ailments {
            Some(path) => AilmentLoader::load(path)?,
            None => factory.load_ailments()?,
        };
        Ok(EffectEngine::new(
            config,
            Arc::new(ailments),
            Arc::new(TileEffectRegistry::standard()),
        ))
    }

    /// Loads the engine, the initial state and the log.
    pub fn load(&self) -> Result<(EffectEngine, GameState, Vec<ActionRecord>)> {
        let factory = self.factory();
        let engine = self.engine(&factory)?;
        let initial = ScenarioLoader::load(&self.scenario)?;
        let log = read_log(&self.log)?;
        debug!(
            data_dir = %factory.data_dir().display(),
            records = log.len(),
            "inputs loaded"
        );
        Ok((engine, initial, log))
    }
}

pub fn read_log(path: &Path) -> Result<Vec<ActionRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read action log {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse action log {}", path.display()))
}
