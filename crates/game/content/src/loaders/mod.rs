//! Content loaders for reading game data from files.
//!
//! Each loader offers `load(path)` for files on disk and `from_str` for
//! in-memory text, so embedded tables and tests share the parsing path.

pub mod ailments;
pub mod config;
pub mod factory;
pub mod map;
pub mod scenario;

pub use ailments::AilmentLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::{MapLoader, MapSpec};
pub use scenario::{ActorSpec, ScenarioLoader, ScenarioSpec};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
