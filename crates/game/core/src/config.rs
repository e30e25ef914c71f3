//! Balance constants and tunable parameters.
//!
//! Every table is `Default`, and with the `serde` feature every field falls
//! back to its default, so a config file only needs to name what it changes.

use strum::{AsRefStr, Display, EnumString};

use crate::env::{Rarity, Tier};
use crate::error::{ErrorSeverity, GameError};

/// Progression model selected at `NewRun`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MapMode {
    #[default]
    Grid,
    Pages,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub run: RunConfig,
    pub economy: EconomyConfig,
    pub leveling: LevelingConfig,
    pub events: EventConfig,
    pub pages: PagesConfig,
}

impl GameConfig {
    // ===== fixed rules =====
    pub const PAGE_OFFERS: usize = 3;
    pub const MIN_MAP_COLUMNS: u32 = 2;
    pub const MAX_MAP_COLUMNS: u32 = 64;
    pub const MAX_PAGES: u32 = 256;
    pub const DEMO_BLESSING: &'static str = "bl_energy_first";
    pub const DEMO_EQUIPMENT: [&'static str; 2] = ["start_shield", "battle_rhythm_band"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map_mode(mut self, mode: MapMode) -> Self {
        self.run.map_mode = mode;
        self
    }

    /// Rejects map sizes the generators cannot build.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let columns = self.run.map_columns;
        if !(Self::MIN_MAP_COLUMNS..=Self::MAX_MAP_COLUMNS).contains(&columns) {
            return Err(ConfigError::MapColumns(columns));
        }
        let pages = self.pages.total_pages;
        if !(1..=Self::MAX_PAGES).contains(&pages) {
            return Err(ConfigError::TotalPages(pages));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "map_columns must be between {min} and {max}, got {0}",
        min = GameConfig::MIN_MAP_COLUMNS,
        max = GameConfig::MAX_MAP_COLUMNS
    )]
    MapColumns(u32),

    #[error("total_pages must be between 1 and {max}, got {0}", max = GameConfig::MAX_PAGES)]
    TotalPages(u32),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapColumns(_) => "CONFIG_MAP_COLUMNS",
            Self::TotalPages(_) => "CONFIG_TOTAL_PAGES",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    pub start_hp: u32,
    pub start_energy: u32,
    pub hand_size: u32,
    pub start_gold: u32,
    pub equipment_slots: u32,
    pub map_columns: u32,
    pub map_mode: MapMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_hp: 50,
            start_energy: 3,
            hand_size: 3,
            start_gold: 80,
            equipment_slots: 2,
            map_columns: 5,
            map_mode: MapMode::Grid,
        }
    }
}

/// Common/uncommon/rare split used by every rarity-first roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RarityWeights {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
}

impl RarityWeights {
    pub const fn new(common: u32, uncommon: u32, rare: u32) -> Self {
        Self {
            common,
            uncommon,
            rare,
        }
    }

    pub const fn total(&self) -> u32 {
        self.common + self.uncommon + self.rare
    }

    /// Maps a roll in `1..=total` onto a rarity.
    pub const fn pick(&self, roll: u32) -> Rarity {
        if roll <= self.common {
            Rarity::Common
        } else if roll <= self.common + self.uncommon {
            Rarity::Uncommon
        } else {
            Rarity::Rare
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EconomyConfig {
    pub reward_count_normal: usize,
    pub reward_count_elite: usize,
    pub reward_count_boss: usize,
    pub reward_weights_normal: RarityWeights,
    pub reward_weights_elite: RarityWeights,
    pub reward_weights_boss: RarityWeights,
    pub shop_weights: RarityWeights,
    pub shop_stock_size: usize,
    pub shop_favored_weight: u32,
    pub price_common: u32,
    pub price_uncommon: u32,
    pub price_rare: u32,
    /// Fractional price increase per act after the first.
    pub price_act_step: f64,
    pub reroll_cost: u32,
    pub remove_costs: Vec<u32>,
    pub upgrade_costs: Vec<u32>,
    /// Added per purchase once a cost table runs out.
    pub cost_step: u32,
}

impl EconomyConfig {
    pub fn reward_count(&self, tier: Tier) -> usize {
        match tier {
            Tier::Normal => self.reward_count_normal,
            Tier::Elite => self.reward_count_elite,
            Tier::Boss => self.reward_count_boss,
        }
    }

    pub fn reward_weights(&self, tier: Tier) -> RarityWeights {
        match tier {
            Tier::Normal => self.reward_weights_normal,
            Tier::Elite => self.reward_weights_elite,
            Tier::Boss => self.reward_weights_boss,
        }
    }

    pub fn base_price(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.price_common,
            Rarity::Uncommon => self.price_uncommon,
            Rarity::Rare => self.price_rare,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            reward_count_normal: 3,
            reward_count_elite: 4,
            reward_count_boss: 5,
            reward_weights_normal: RarityWeights::new(70, 25, 5),
            reward_weights_elite: RarityWeights::new(55, 35, 10),
            reward_weights_boss: RarityWeights::new(40, 40, 20),
            shop_weights: RarityWeights::new(70, 25, 5),
            shop_stock_size: 6,
            shop_favored_weight: 3,
            price_common: 35,
            price_uncommon: 65,
            price_rare: 120,
            price_act_step: 0.05,
            reroll_cost: 20,
            remove_costs: vec![0, 20, 50, 90, 140, 200],
            upgrade_costs: vec![0, 30, 60, 100, 150, 200],
            cost_step: 60,
        }
    }
}

/// Relative weights of the level-up buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BucketWeights {
    pub max_hp: u32,
    pub max_energy: u32,
    pub max_hand: u32,
    pub cards: u32,
    pub blessing: u32,
    pub remove: u32,
    pub upgrade: u32,
    pub gold: u32,
}

impl Default for BucketWeights {
    fn default() -> Self {
        Self {
            max_hp: 20,
            max_energy: 12,
            max_hand: 12,
            cards: 24,
            blessing: 12,
            remove: 10,
            upgrade: 8,
            gold: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelingConfig {
    pub exp_normal: u32,
    pub exp_elite: u32,
    pub exp_boss: u32,
    pub buckets: BucketWeights,
    pub max_hp_gain: u32,
    pub gold_gain: u32,
    pub skip_gold: u32,
}

impl LevelingConfig {
    pub fn exp_for(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Normal => self.exp_normal,
            Tier::Elite => self.exp_elite,
            Tier::Boss => self.exp_boss,
        }
    }
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            exp_normal: 10,
            exp_elite: 25,
            exp_boss: 100,
            buckets: BucketWeights::default(),
            max_hp_gain: 5,
            gold_gain: 25,
            skip_gold: 25,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventConfig {
    pub remove_cap_per_run: u32,
    pub gamble_win_gold: u32,
    pub gamble_loss_hp: u32,
    pub treasure_min: u32,
    pub treasure_max: u32,
    pub bonfire_heal: u32,
    pub well_heal: u32,
    pub shrine_options: usize,
    pub shrine_weights: RarityWeights,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            remove_cap_per_run: 2,
            gamble_win_gold: 40,
            gamble_loss_hp: 10,
            treasure_min: 30,
            treasure_max: 80,
            bonfire_heal: 10,
            well_heal: 10,
            shrine_options: 3,
            shrine_weights: RarityWeights::new(70, 25, 5),
        }
    }
}

/// Starting token counts for the pages model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenCounts {
    pub monster_normal: u32,
    pub monster_elite: u32,
    pub shop_card: u32,
    pub shop_remove: u32,
    pub shop_upgrade: u32,
    pub well: u32,
    pub next_event: u32,
}

impl Default for TokenCounts {
    fn default() -> Self {
        Self {
            monster_normal: 7,
            monster_elite: 1,
            shop_card: 3,
            shop_remove: 2,
            shop_upgrade: 2,
            well: 2,
            next_event: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PagesConfig {
    pub total_pages: u32,
    pub tokens: TokenCounts,
    /// Sampling weight per offer kind; the same shape as the token table.
    pub weights: TokenCounts,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            total_pages: 12,
            tokens: TokenCounts::default(),
            weights: TokenCounts {
                monster_normal: 5,
                monster_elite: 2,
                shop_card: 2,
                shop_remove: 2,
                shop_upgrade: 2,
                well: 1,
                next_event: 1,
            },
        }
    }
}
