//! Multi-pack content registry.
//!
//! The registry owns every registered [`ContentPack`] and one validated
//! [`ContentSnapshot`] for the active pack. Activating another pack builds
//! its snapshot first and swaps only when the build succeeds, so lookups
//! never observe a half-rebuilt set of pools.

use std::collections::BTreeMap;
use std::sync::Arc;

use game_core::{
    BlessingRecord, CardRecord, ContentError, ContentOracle, ContentPack, ContentSnapshot,
    EnemyRecord, EquipmentRecord, GameConfig, GameEnv, Rarity, Tier,
};

/// Registered packs plus the snapshot of the active one.
#[derive(Clone, Debug)]
pub struct ContentRegistry {
    packs: BTreeMap<String, ContentPack>,
    active: Arc<ContentSnapshot>,
}

impl ContentRegistry {
    /// Creates a registry holding `pack` and activates it.
    pub fn new(pack: ContentPack) -> Result<Self, ContentError> {
        let active = Arc::new(ContentSnapshot::build(pack.clone())?);
        tracing::info!(target: "content::registry", pack = %pack.id, "activated content pack");
        let mut packs = BTreeMap::new();
        packs.insert(pack.id.clone(), pack);
        Ok(Self { packs, active })
    }

    /// Registry over the embedded packs with [`DEFAULT_PACK`] active.
    ///
    /// [`DEFAULT_PACK`]: crate::builtin::DEFAULT_PACK
    #[cfg(feature = "loaders")]
    pub fn with_builtin() -> crate::loaders::LoadResult<Self> {
        let mut packs = crate::builtin::builtin_packs()?.into_iter();
        let first = packs
            .next()
            .ok_or_else(|| anyhow::anyhow!("No builtin packs embedded"))?;
        let mut registry = Self::new(first)?;
        for pack in packs {
            registry.register(pack);
        }
        registry.activate(crate::builtin::DEFAULT_PACK)?;
        Ok(registry)
    }

    /// Adds or replaces a pack. The active snapshot is left untouched,
    /// even when `pack` shares its id; call [`activate`](Self::activate)
    /// to pick the new tables up.
    pub fn register(&mut self, pack: ContentPack) {
        tracing::info!(
            target: "content::registry",
            pack = %pack.id,
            cards = pack.cards.len(),
            enemies = pack.enemies.len(),
            "registered content pack"
        );
        self.packs.insert(pack.id.clone(), pack);
    }

    /// Makes `id` the active pack.
    ///
    /// On error the previously active snapshot stays in place.
    pub fn activate(&mut self, id: &str) -> Result<(), ContentError> {
        let pack = self
            .packs
            .get(id)
            .ok_or_else(|| ContentError::UnknownPack(id.to_owned()))?;
        let snapshot = ContentSnapshot::build(pack.clone())?;
        self.active = Arc::new(snapshot);
        tracing::info!(target: "content::registry", pack = %id, "activated content pack");
        Ok(())
    }

    /// Shared handle to the active snapshot. It stays valid after later swaps.
    pub fn snapshot(&self) -> Arc<ContentSnapshot> {
        Arc::clone(&self.active)
    }

    pub fn active(&self) -> &ContentSnapshot {
        &self.active
    }

    pub fn active_id(&self) -> &str {
        self.active.pack_id()
    }

    pub fn pack_ids(&self) -> impl Iterator<Item = &str> {
        self.packs.keys().map(String::as_str)
    }

    pub fn pack(&self, id: &str) -> Option<&ContentPack> {
        self.packs.get(id)
    }

    /// Bundles the active content with `config` for the engine.
    pub fn env<'a>(&'a self, config: &'a GameConfig) -> GameEnv<'a> {
        GameEnv::new(self, config)
    }
}

impl ContentOracle for ContentRegistry {
    fn card(&self, id: &str) -> Option<&CardRecord> {
        self.active.card(id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyRecord> {
        self.active.enemy(id)
    }

    fn blessing(&self, id: &str) -> Option<&BlessingRecord> {
        self.active.blessing(id)
    }

    fn equipment(&self, id: &str) -> Option<&EquipmentRecord> {
        self.active.equipment(id)
    }

    fn starter_deck(&self) -> &[CardRecord] {
        self.active.starter_deck()
    }

    fn reward_pool(&self) -> &[CardRecord] {
        self.active.reward_pool()
    }

    fn cards_by_rarity(&self, rarity: Rarity) -> &[CardRecord] {
        self.active.cards_by_rarity(rarity)
    }

    fn enemies_by_tier(&self, tier: Tier) -> &[EnemyRecord] {
        self.active.enemies_by_tier(tier)
    }

    fn blessings(&self) -> &[BlessingRecord] {
        self.active.blessings()
    }

    fn blessings_by_rarity(&self, rarity: Rarity) -> &[BlessingRecord] {
        self.active.blessings_by_rarity(rarity)
    }

    fn all_equipment(&self) -> &[EquipmentRecord] {
        self.active.all_equipment()
    }
}
