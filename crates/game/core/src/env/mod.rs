//! Traits describing read-only content and the environment handed to the engine.
//!
//! The [`ContentOracle`] exposes card, enemy, blessing and equipment tables.
//! [`GameEnv`] bundles it with the balance [`GameConfig`] so handlers receive
//! everything they read through one injected value instead of global state.
mod error;
mod records;
mod rng;
mod snapshot;

pub use error::ContentError;
pub use records::{
    BlessingRecord, CardKind, CardRecord, ContentPack, Effect, EnemyRecord, EquipmentRecord,
    HookCondition, HookSpec, Rarity, Tier, Trigger,
};
pub use rng::GeneratorState;
pub use snapshot::ContentSnapshot;

use crate::config::GameConfig;

/// Read-only lookup over the active content pack.
///
/// Pools returned by the bucket accessors are in content order; callers
/// that need randomness draw from them with the threaded generator.
pub trait ContentOracle {
    fn card(&self, id: &str) -> Option<&CardRecord>;
    fn enemy(&self, id: &str) -> Option<&EnemyRecord>;
    fn blessing(&self, id: &str) -> Option<&BlessingRecord>;
    fn equipment(&self, id: &str) -> Option<&EquipmentRecord>;

    /// Master deck handed out at `NewRun`, one entry per copy.
    fn starter_deck(&self) -> &[CardRecord];

    /// Every card eligible for rewards and shops.
    fn reward_pool(&self) -> &[CardRecord];
    fn cards_by_rarity(&self, rarity: Rarity) -> &[CardRecord];

    fn enemies_by_tier(&self, tier: Tier) -> &[EnemyRecord];

    fn blessings(&self) -> &[BlessingRecord];
    fn blessings_by_rarity(&self, rarity: Rarity) -> &[BlessingRecord];

    fn all_equipment(&self) -> &[EquipmentRecord];

    fn require_blessing(&self, id: &str) -> Result<&BlessingRecord, ContentError> {
        self.blessing(id)
            .ok_or_else(|| ContentError::UnknownBlessing(id.to_owned()))
    }

    fn require_equipment(&self, id: &str) -> Result<&EquipmentRecord, ContentError> {
        self.equipment(id)
            .ok_or_else(|| ContentError::UnknownEquipment(id.to_owned()))
    }

    fn require_tier(&self, tier: Tier) -> Result<&[EnemyRecord], ContentError> {
        let pool = self.enemies_by_tier(tier);
        if pool.is_empty() {
            Err(ContentError::EmptyTier(tier))
        } else {
            Ok(pool)
        }
    }
}

/// Everything a command handler may read besides the run state itself.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    content: &'a dyn ContentOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(content: &'a dyn ContentOracle, config: &'a GameConfig) -> Self {
        Self { content, config }
    }

    pub fn content(&self) -> &'a dyn ContentOracle {
        self.content
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
