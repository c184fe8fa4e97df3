//! Content factory for building the effect engine and scenarios from a data
//! directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tactics_core::{AilmentCatalog, EffectEngine, GameConfig, GameState, TileEffectRegistry, TileMap};
use tracing::{debug, info};

use crate::loaders::{AilmentLoader, ConfigLoader, LoadResult, MapLoader, ScenarioLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── ailments.ron
/// ├── maps/
/// │   └── lava_bridge.ron
/// └── scenarios/
///     └── ember_duel.ron
/// ```
///
/// `config.toml` and `ailments.ron` are optional: a missing file falls back
/// to the defaults compiled into the crate.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the ailment catalog from `ailments.ron`.
    pub fn load_ailments(&self) -> LoadResult<AilmentCatalog> {
        let path = self.data_dir.join("ailments.ron");
        if !path.exists() {
            debug!(path = %path.display(), "no ailment table, using embedded defaults");
            return AilmentLoader::embedded();
        }
        AilmentLoader::load(&path)
    }

    /// Load a map from `maps/<name>.ron`.
    pub fn load_map(&self, name: &str) -> LoadResult<TileMap> {
        let path = self.data_dir.join("maps").join(format!("{name}.ron"));
        MapLoader::load(&path)
    }

    /// Load a scenario from `scenarios/<name>.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<GameState> {
        let path = self.data_dir.join("scenarios").join(format!("{name}.ron"));
        ScenarioLoader::load(&path)
    }

    /// Builds an engine from the directory's config and ailment table with
    /// the standard tile effect registry.
    pub fn build_engine(&self) -> LoadResult<EffectEngine> {
        let config = self.load_config()?;
        let ailments = self.load_ailments()?;
        info!(
            data_dir = %self.data_dir.display(),
            ailments = ailments.len(),
            ailments_enabled = config.ailments_enabled,
            "content loaded"
        );
        Ok(EffectEngine::new(
            config,
            Arc::new(ailments),
            Arc::new(TileEffectRegistry::standard()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tactics_core::{AilmentId, EntityId};
    use tempfile::TempDir;

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();
        let engine = factory.build_engine().unwrap();
        assert!(engine.ailments().get(AilmentId::Burn).is_some());

        let map = factory.load_map("lava_bridge").unwrap();
        assert!(!map.is_empty());

        let state = factory.load_scenario("ember_duel").unwrap();
        assert!(state.actor(EntityId(1)).is_some());
    }

    #[test]
    fn empty_directory_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert_eq!(factory.load_ailments().unwrap().len(), 5);
        assert!(factory.load_scenario("missing").is_err());
    }

    #[test]
    fn directory_files_override_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "ailments_enabled = false\n").unwrap();
        fs::write(
            dir.path().join("ailments.ron"),
            "[(id: bleed, attack_stat: Body, defense_stat: Body, scaling_factor: 0.0, base_deposit: 1.0)]",
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert!(!factory.load_config().unwrap().ailments_enabled);
        let catalog = factory.load_ailments().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(AilmentId::Bleed).is_some());
    }
}
