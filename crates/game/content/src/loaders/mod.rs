//! Content loaders for reading game data from files.
//!
//! Packs are RON, balance configuration is TOML. Every loader returns
//! [`LoadResult`] with a message naming the file or table that failed.

pub mod config;
pub mod factory;
pub mod pack;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use pack::{PackLoader, PackManifest, PackSources};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
