//! Authoritative run state representation.
//!
//! [`RunState`] is the single aggregate threaded through the engine. The
//! engine clones it on every command, so callers may keep earlier snapshots
//! for replay or undo without the core aliasing into them.
#[cfg(feature = "serde")]
mod digest;
pub mod types;

use bitflags::bitflags;
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub use types::{
    CardInstance, DeckPile, EventKind, EventState, LevelUpBucket, Loadout, PendingLevelUp, Piles,
    PlayerState, RewardState, RunCounters, ShopItem, ShopKind, ShopState, StarterChoice,
    TurnFlags, exp_to_next,
};

use crate::config::MapMode;
use crate::env::{BlessingRecord, CardRecord, EnemyRecord, Tier};
use crate::map::Progression;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    Menu,
    Starter,
    Map,
    Combat,
    Shop,
    Event,
    #[strum(serialize = "levelup")]
    #[cfg_attr(feature = "serde", serde(rename = "levelup"))]
    LevelUp,
    Reward,
    Victory,
    Defeat,
}

bitflags! {
    /// Set of phases a command is accepted in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PhaseSet: u16 {
        const MENU = 1 << 0;
        const STARTER = 1 << 1;
        const MAP = 1 << 2;
        const COMBAT = 1 << 3;
        const SHOP = 1 << 4;
        const EVENT = 1 << 5;
        const LEVEL_UP = 1 << 6;
        const REWARD = 1 << 7;
        const VICTORY = 1 << 8;
        const DEFEAT = 1 << 9;

        /// Phases in which a run is underway and not yet decided.
        const IN_RUN = Self::STARTER.bits()
            | Self::MAP.bits()
            | Self::COMBAT.bits()
            | Self::SHOP.bits()
            | Self::EVENT.bits()
            | Self::LEVEL_UP.bits()
            | Self::REWARD.bits()
            | Self::VICTORY.bits();
    }
}

impl Phase {
    pub const fn as_set(self) -> PhaseSet {
        match self {
            Self::Menu => PhaseSet::MENU,
            Self::Starter => PhaseSet::STARTER,
            Self::Map => PhaseSet::MAP,
            Self::Combat => PhaseSet::COMBAT,
            Self::Shop => PhaseSet::SHOP,
            Self::Event => PhaseSet::EVENT,
            Self::LevelUp => PhaseSet::LEVEL_UP,
            Self::Reward => PhaseSet::REWARD,
            Self::Victory => PhaseSet::VICTORY,
            Self::Defeat => PhaseSet::DEFEAT,
        }
    }

    pub const fn is_in(self, set: PhaseSet) -> bool {
        set.contains(self.as_set())
    }
}

/// Canonical snapshot of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunState {
    pub seed: String,
    pub phase: Phase,
    /// Player turn within the current combat; zero outside combat.
    pub turn: u32,
    pub act: u32,
    pub player: PlayerState,
    pub enemy: Option<EnemyRecord>,
    /// Tier of the node or offer that spawned the current enemy.
    pub encounter: Option<Tier>,
    pub piles: Piles,
    /// Append-only, human-readable event log.
    pub log: Vec<String>,
    pub blessings: Vec<BlessingRecord>,
    pub loadout: Loadout,
    /// Persists across combats; dealt fresh at every combat start.
    pub master_deck: Vec<CardRecord>,
    pub turn_flags: TurnFlags,
    pub counters: RunCounters,
    pub level_up: Option<PendingLevelUp>,
    pub starter: Option<StarterChoice>,
    pub progression: Option<Progression>,
    pub shop: Option<ShopState>,
    pub event: Option<EventState>,
    pub reward: Option<RewardState>,
    pub combat_victory_lock: bool,
    pub run_complete: bool,
    pub deck_open: bool,
}

impl RunState {
    /// Pre-run state shown before the first `NewRun`.
    pub fn menu() -> Self {
        Self::default()
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    pub fn last_log(&self) -> Option<&str> {
        self.log.last().map(String::as_str)
    }

    pub fn map_mode(&self) -> Option<MapMode> {
        self.progression.as_ref().map(Progression::mode)
    }

    pub fn owns_blessing(&self, id: &str) -> bool {
        self.blessings.iter().any(|blessing| blessing.id == id)
    }

    pub fn in_combat(&self) -> bool {
        self.phase == Phase::Combat
    }

    pub fn level_up_pending(&self) -> bool {
        self.level_up.as_ref().is_some_and(PendingLevelUp::is_open)
    }
}
