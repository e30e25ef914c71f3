//! Deterministic rules engine for a deck-building roguelike run.
//!
//! `game-core` defines the canonical rules (commands, engine, run state) and
//! exposes pure APIs that hosts, tools and tests reuse. All state mutation
//! flows through [`engine::GameEngine`]: a command, the previous state and a
//! generator state go in, the next state and generator state come out.
//! Content tables and balance numbers are injected through [`GameEnv`].
pub mod command;
pub mod config;
pub mod economy;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod map;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(feature = "serde")]
pub use command::compute_commands_root;
pub use command::{Command, CommandTag};
pub use config::{
    BucketWeights, ConfigError, EconomyConfig, EventConfig, GameConfig, LevelingConfig, MapMode, PagesConfig,
    RarityWeights, RunConfig, TokenCounts,
};
pub use effects::{HookError, HookEvent};
pub use engine::{EngineError, GameEngine, InvariantViolation, Rejection, apply};
pub use env::{
    BlessingRecord, CardKind, CardRecord, ContentError, ContentOracle, ContentPack,
    ContentSnapshot, Effect, EnemyRecord, EquipmentRecord, GameEnv, GeneratorState, HookCondition,
    HookSpec, Rarity, Tier, Trigger,
};
pub use error::{ErrorSeverity, GameError};
pub use map::{GridMap, MapNode, NodeKind, OfferKind, PagesMap, Progression, SlotStatus};
pub use state::{
    CardInstance, DeckPile, EventKind, EventState, LevelUpBucket, Loadout, PendingLevelUp, Phase,
    PhaseSet, Piles, PlayerState, RewardState, RunCounters, RunState, ShopItem, ShopKind,
    ShopState,
};
