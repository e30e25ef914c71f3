//! Content pack loader.
//!
//! A pack is five RON files in one directory:
//!
//! ```text
//! packs/<id>/
//! ├── pack.ron        (id, name, starter_deck)
//! ├── cards.ron       (cards: [...])
//! ├── enemies.ron     (enemies: [...])
//! ├── blessings.ron   (blessings: [...])
//! └── equipment.ron   (equipment: [...])
//! ```

use std::path::Path;

use game_core::{BlessingRecord, CardRecord, ContentPack, EnemyRecord, EquipmentRecord};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Pack identity and starter deck, read from `pack.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackManifest {
    pub id: String,
    pub name: String,
    /// Card ids, repeated once per copy.
    pub starter_deck: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CardCatalog {
    cards: Vec<CardRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnemyCatalog {
    enemies: Vec<EnemyRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BlessingCatalog {
    blessings: Vec<BlessingRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EquipmentCatalog {
    #[serde(default)]
    equipment: Vec<EquipmentRecord>,
}

/// Raw RON text of the five pack files.
#[derive(Debug, Clone, Copy)]
pub struct PackSources<'a> {
    pub manifest: &'a str,
    pub cards: &'a str,
    pub enemies: &'a str,
    pub blessings: &'a str,
    pub equipment: &'a str,
}

/// Loader for content packs from RON files.
pub struct PackLoader;

impl PackLoader {
    /// Load a pack from its directory.
    ///
    /// The result is unvalidated; build a
    /// [`ContentSnapshot`](game_core::ContentSnapshot) to check it.
    pub fn load(dir: &Path) -> LoadResult<ContentPack> {
        let manifest = read_file(&dir.join("pack.ron"))?;
        let cards = read_file(&dir.join("cards.ron"))?;
        let enemies = read_file(&dir.join("enemies.ron"))?;
        let blessings = read_file(&dir.join("blessings.ron"))?;
        let equipment = read_file(&dir.join("equipment.ron"))?;

        Self::parse(PackSources {
            manifest: &manifest,
            cards: &cards,
            enemies: &enemies,
            blessings: &blessings,
            equipment: &equipment,
        })
        .map_err(|e| anyhow::anyhow!("Failed to load pack at {}: {}", dir.display(), e))
    }

    /// Parse a pack from in-memory RON sources.
    pub fn parse(sources: PackSources<'_>) -> LoadResult<ContentPack> {
        let manifest: PackManifest = ron::from_str(sources.manifest)
            .map_err(|e| anyhow::anyhow!("Failed to parse pack manifest RON: {}", e))?;
        let cards: CardCatalog = ron::from_str(sources.cards)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;
        let enemies: EnemyCatalog = ron::from_str(sources.enemies)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;
        let blessings: BlessingCatalog = ron::from_str(sources.blessings)
            .map_err(|e| anyhow::anyhow!("Failed to parse blessing catalog RON: {}", e))?;
        let equipment: EquipmentCatalog = ron::from_str(sources.equipment)
            .map_err(|e| anyhow::anyhow!("Failed to parse equipment catalog RON: {}", e))?;

        Ok(ContentPack {
            id: manifest.id,
            name: manifest.name,
            starter_deck: manifest.starter_deck,
            cards: cards.cards,
            enemies: enemies.enemies,
            blessings: blessings.blessings,
            equipment: equipment.equipment,
        })
    }
}
