//! Content factory for loading packs and configuration from a data directory.

use std::path::{Path, PathBuf};

use game_core::{ContentPack, GameConfig};

use crate::loaders::{ConfigLoader, LoadResult, PackLoader};

/// Loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── packs/
///     ├── base/
///     └── trial/
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the pack stored under `packs/{id}/`.
    pub fn load_pack(&self, id: &str) -> LoadResult<ContentPack> {
        PackLoader::load(&self.packs_dir().join(id))
    }

    /// Ids of every pack directory under `packs/`, sorted.
    pub fn pack_ids(&self) -> LoadResult<Vec<String>> {
        let dir = self.packs_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to list packs in {}: {}", dir.display(), e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Load every pack under `packs/`.
    pub fn load_packs(&self) -> LoadResult<Vec<ContentPack>> {
        self.pack_ids()?
            .iter()
            .map(|id| self.load_pack(id))
            .collect()
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn packs_dir(&self) -> PathBuf {
        self.data_dir.join("packs")
    }
}
