//! Packs compiled into the crate.
//!
//! The RON files under `data/packs/` are embedded at build time so hosts
//! and tests can run without a data directory.

use game_core::ContentPack;

use crate::loaders::{LoadResult, PackLoader, PackSources};

macro_rules! embedded_pack {
    ($id:literal) => {
        PackSources {
            manifest: include_str!(concat!("../data/packs/", $id, "/pack.ron")),
            cards: include_str!(concat!("../data/packs/", $id, "/cards.ron")),
            enemies: include_str!(concat!("../data/packs/", $id, "/enemies.ron")),
            blessings: include_str!(concat!("../data/packs/", $id, "/blessings.ron")),
            equipment: include_str!(concat!("../data/packs/", $id, "/equipment.ron")),
        }
    };
}

/// Id of the pack a registry activates first.
pub const DEFAULT_PACK: &str = "base";

/// Ids of every embedded pack.
pub const BUILTIN_PACKS: [&str; 2] = ["base", "trial"];

fn sources(id: &str) -> Option<PackSources<'static>> {
    match id {
        "base" => Some(embedded_pack!("base")),
        "trial" => Some(embedded_pack!("trial")),
        _ => None,
    }
}

/// Parses one embedded pack.
pub fn builtin_pack(id: &str) -> LoadResult<ContentPack> {
    let sources = sources(id).ok_or_else(|| anyhow::anyhow!("No builtin pack named '{}'", id))?;
    PackLoader::parse(sources).map_err(|e| anyhow::anyhow!("Builtin pack '{}': {}", id, e))
}

/// Parses every embedded pack, in [`BUILTIN_PACKS`] order.
pub fn builtin_packs() -> LoadResult<Vec<ContentPack>> {
    BUILTIN_PACKS.iter().map(|id| builtin_pack(id)).collect()
}
