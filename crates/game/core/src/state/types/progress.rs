//! Run-scoped bookkeeping: counters, turn gates and pending choices.

use std::collections::BTreeSet;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::env::{BlessingRecord, CardRecord};

/// Purchases and removals made over the whole run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunCounters {
    /// Every card removed from the master deck, whatever the source.
    pub cards_removed: u32,
    /// Removals through remove events; capped per run.
    pub event_removals: u32,
    pub shop_cards: u32,
    pub shop_removals: u32,
    pub shop_upgrades: u32,
    pub rerolls: u32,
}

/// One-shot gates reset at the start of every player turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnFlags {
    fired: BTreeSet<String>,
}

impl TurnFlags {
    /// Marks `key` as fired and returns whether it was free before.
    pub fn claim(&mut self, key: &str) -> bool {
        if self.fired.contains(key) {
            return false;
        }
        self.fired.insert(key.to_owned());
        true
    }

    pub fn has_fired(&self, key: &str) -> bool {
        self.fired.contains(key)
    }

    pub fn reset(&mut self) {
        self.fired.clear();
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LevelUpBucket {
    MaxHp,
    MaxEnergy,
    MaxHand,
    Cards,
    Blessing,
    Remove,
    Upgrade,
    Gold,
}

impl LevelUpBucket {
    /// Buckets whose resolution needs an index from the player.
    pub const fn needs_index(self) -> bool {
        matches!(
            self,
            Self::Cards | Self::Blessing | Self::Remove | Self::Upgrade
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingLevelUp {
    pub bucket: LevelUpBucket,
    #[cfg_attr(feature = "serde", serde(default))]
    pub card_choices: Vec<CardRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blessing_choices: Vec<BlessingRecord>,
    pub consumed: bool,
}

impl PendingLevelUp {
    pub fn new(bucket: LevelUpBucket) -> Self {
        Self {
            bucket,
            card_choices: Vec::new(),
            blessing_choices: Vec::new(),
            consumed: false,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.consumed
    }
}

/// Starter blessings offered right after `NewRun`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StarterChoice {
    pub options: Vec<BlessingRecord>,
}
