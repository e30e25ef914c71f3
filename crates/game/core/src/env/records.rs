//! Content records consumed through the [`ContentOracle`](super::ContentOracle).
//!
//! Records are plain data. Blessing and equipment behaviour is described by
//! [`HookSpec`] values and interpreted by the effect runtime, so a record can
//! be cloned, compared and serialized like any other value.

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Card category, used by hook conditions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum CardKind {
    Attack,
    Skill,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
}

/// Combat difficulty class of an enemy or the node that spawned it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, AsRefStr, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Tier {
    Normal,
    Elite,
    Boss,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    pub kind: CardKind,
    pub cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub draw: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_gain: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Option<Rarity>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Moves to the exhaust pile instead of discard when played.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exhaust: bool,
    /// Starter-only cards never appear in rewards or shops.
    #[cfg_attr(feature = "serde", serde(default))]
    pub starter: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub in_rewards: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub favored_in_shop: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgraded: bool,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl CardRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: CardKind, cost: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            cost,
            damage: None,
            block: None,
            draw: None,
            energy_gain: None,
            heal: None,
            rarity: None,
            tags: Vec::new(),
            exhaust: false,
            starter: false,
            in_rewards: true,
            favored_in_shop: false,
            upgraded: false,
        }
    }

    /// Rarity with the common default applied.
    pub fn rarity(&self) -> Rarity {
        self.rarity.unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Eligible for reward and shop rolls.
    pub fn is_rewardable(&self) -> bool {
        !self.starter && self.in_rewards
    }

    /// Applies one upgrade step: name suffix plus +3 on damage and block.
    pub fn upgrade(&mut self) {
        const BONUS: u32 = 3;
        self.name.push_str(" +");
        if let Some(damage) = self.damage.as_mut() {
            *damage += BONUS;
        }
        if let Some(block) = self.block.as_mut() {
            *block += BONUS;
        }
        self.upgraded = true;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyRecord {
    pub id: String,
    pub name: String,
    pub max_hp: u32,
    /// Starts equal to `max_hp` when omitted from content.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: u32,
    pub tier: Tier,
}

impl EnemyRecord {
    pub fn current_hp(&self) -> u32 {
        self.hp.unwrap_or(self.max_hp)
    }

    /// Applies damage floored at zero and returns the hp left.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let left = self.current_hp().saturating_sub(amount);
        self.hp = Some(left);
        left
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp() == 0
    }

    /// Fresh copy at full health, ready to enter a combat.
    pub fn spawn(&self) -> Self {
        Self {
            hp: Some(self.max_hp),
            ..self.clone()
        }
    }
}

/// Point in the turn cycle at which a hook runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Trigger {
    TurnStart,
    TurnEnd,
    CardPlayed,
    /// Equipment only: once when a combat begins.
    Equip,
}

/// Optional scope for `card_played` hooks. Empty matches every card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HookCondition {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tag: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: Option<CardKind>,
}

impl HookCondition {
    pub fn matches(&self, card: &CardRecord) -> bool {
        let tag_ok = self.tag.as_deref().is_none_or(|tag| card.has_tag(tag));
        let kind_ok = self.kind.is_none_or(|kind| card.kind == kind);
        tag_ok && kind_ok
    }
}

/// Effect vocabulary understood by the hook interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Effect {
    GainBlock(u32),
    GainEnergy(u32),
    Heal(u32),
    GainGold(u32),
    DamageEnemy(u32),
    Draw(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HookSpec {
    pub trigger: Trigger,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: HookCondition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub once_per_turn: bool,
    pub effect: Effect,
}

impl HookSpec {
    pub fn new(trigger: Trigger, effect: Effect) -> Self {
        Self {
            trigger,
            condition: HookCondition::default(),
            once_per_turn: false,
            effect,
        }
    }

    pub fn once_per_turn(mut self) -> Self {
        self.once_per_turn = true;
        self
    }

    pub fn when_tag(mut self, tag: impl Into<String>) -> Self {
        self.condition.tag = Some(tag.into());
        self
    }

    pub fn when_kind(mut self, kind: CardKind) -> Self {
        self.condition.kind = Some(kind);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlessingRecord {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Option<Rarity>,
    /// Gates every hook of this blessing to once per turn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub once_per_turn: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hooks: Vec<HookSpec>,
}

impl BlessingRecord {
    pub fn rarity(&self) -> Rarity {
        self.rarity.unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentRecord {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Option<Rarity>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub once_per_turn: bool,
    /// Slots consumed while equipped; zero is treated as one.
    #[cfg_attr(feature = "serde", serde(default = "default_slot_cost"))]
    pub slot_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hooks: Vec<HookSpec>,
}

#[cfg(feature = "serde")]
fn default_slot_cost() -> u32 {
    1
}

impl EquipmentRecord {
    pub fn effective_slot_cost(&self) -> u32 {
        self.slot_cost.max(1)
    }
}

/// One complete, unvalidated content table set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentPack {
    pub id: String,
    pub name: String,
    /// Card ids, repeated once per copy.
    pub starter_deck: Vec<String>,
    pub cards: Vec<CardRecord>,
    pub enemies: Vec<EnemyRecord>,
    pub blessings: Vec<BlessingRecord>,
    pub equipment: Vec<EquipmentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_bumps_present_values_only() {
        let mut card = CardRecord::new("strike", "Strike", CardKind::Attack, 1);
        card.damage = Some(6);
        card.upgrade();
        assert_eq!(card.name, "Strike +");
        assert_eq!(card.damage, Some(9));
        assert_eq!(card.block, None);
        assert!(card.upgraded);
    }

    #[test]
    fn condition_matches_tag_and_kind() {
        let mut card = CardRecord::new("bash", "Bash", CardKind::Attack, 2);
        card.tags.push("heavy".into());

        assert!(HookCondition::default().matches(&card));
        let spec = HookSpec::new(Trigger::CardPlayed, Effect::GainBlock(1)).when_tag("heavy");
        assert!(spec.condition.matches(&card));
        let spec = spec.when_kind(CardKind::Skill);
        assert!(!spec.condition.matches(&card));
    }

    #[test]
    fn enemy_damage_floors_at_zero() {
        let mut enemy = EnemyRecord {
            id: "slime".into(),
            name: "Slime".into(),
            max_hp: 10,
            hp: None,
            damage: 3,
            block: 0,
            tier: Tier::Normal,
        };
        assert_eq!(enemy.take_damage(4), 6);
        assert_eq!(enemy.take_damage(40), 0);
        assert!(enemy.is_dead());
        assert_eq!(enemy.spawn().current_hp(), 10);
    }
}
