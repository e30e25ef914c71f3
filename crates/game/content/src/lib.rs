//! Data-driven content packs and loaders.
//!
//! This crate houses the static game content and everything needed to get
//! it into the engine:
//! - Content packs (cards, enemies, blessings, equipment) as RON
//! - Balance configuration as TOML
//! - The embedded `base` and `trial` packs
//! - [`ContentRegistry`], which selects the active pack at runtime
//!
//! Content is consumed through [`game_core::ContentOracle`] and never appears
//! in run state except as copied records.

pub mod registry;

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

pub use registry::ContentRegistry;

#[cfg(feature = "loaders")]
pub use builtin::{BUILTIN_PACKS, DEFAULT_PACK, builtin_pack, builtin_packs};
#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, PackLoader, PackManifest, PackSources};
