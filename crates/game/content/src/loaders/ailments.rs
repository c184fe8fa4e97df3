//! Ailment catalog loader.

use std::path::Path;

use anyhow::Context;
use tactics_core::{AilmentCatalog, AilmentDefinition};

use crate::loaders::{LoadResult, read_file};

/// Default ailment table compiled into the crate.
const EMBEDDED_AILMENTS: &str = include_str!("../../data/ailments.ron");

/// Loader for ailment definitions from RON files.
///
/// The file holds a list of definitions. Schema errors, duplicate ids,
/// out-of-range numbers and cycles in the annihilation graph are all
/// rejected here, before any simulation runs.
pub struct AilmentLoader;

impl AilmentLoader {
    pub fn load(path: &Path) -> LoadResult<AilmentCatalog> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("Invalid ailment table {}", path.display()))
    }

    pub fn from_str(content: &str) -> LoadResult<AilmentCatalog> {
        let definitions: Vec<AilmentDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ailments RON: {}", e))?;
        let catalog = AilmentCatalog::new(definitions)?;
        Ok(catalog)
    }

    /// The bundled default table.
    pub fn embedded() -> LoadResult<AilmentCatalog> {
        Self::from_str(EMBEDDED_AILMENTS).context("Invalid embedded ailment table")
    }
}
