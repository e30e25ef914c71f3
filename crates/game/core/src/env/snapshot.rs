//! Validated, pre-bucketed view over a [`ContentPack`].
//!
//! The snapshot owns its records and every derived pool (starter deck,
//! reward pool, rarity and tier buckets), so swapping packs is a matter of
//! building a new snapshot and replacing the old one in a single move.

use std::collections::{BTreeMap, BTreeSet};

use super::{
    BlessingRecord, CardRecord, ContentError, ContentOracle, ContentPack, EnemyRecord,
    EquipmentRecord, Rarity, Tier,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentSnapshot {
    pack_id: String,
    cards: Vec<CardRecord>,
    enemies: Vec<EnemyRecord>,
    blessings: Vec<BlessingRecord>,
    equipment: Vec<EquipmentRecord>,
    starter_deck: Vec<CardRecord>,
    reward_pool: Vec<CardRecord>,
    cards_by_rarity: BTreeMap<Rarity, Vec<CardRecord>>,
    enemies_by_tier: BTreeMap<Tier, Vec<EnemyRecord>>,
    blessings_by_rarity: BTreeMap<Rarity, Vec<BlessingRecord>>,
}

impl ContentSnapshot {
    /// Validates a pack and derives every lookup pool from it.
    pub fn build(pack: ContentPack) -> Result<Self, ContentError> {
        ensure_unique("card", pack.cards.iter().map(|c| c.id.as_str()))?;
        ensure_unique("enemy", pack.enemies.iter().map(|e| e.id.as_str()))?;
        ensure_unique("blessing", pack.blessings.iter().map(|b| b.id.as_str()))?;
        ensure_unique("equipment", pack.equipment.iter().map(|e| e.id.as_str()))?;

        if pack.starter_deck.is_empty() {
            return Err(ContentError::EmptyStarterDeck);
        }
        if pack.blessings.is_empty() {
            return Err(ContentError::NoBlessings);
        }

        let starter_deck = pack
            .starter_deck
            .iter()
            .map(|id| {
                pack.cards
                    .iter()
                    .find(|card| &card.id == id)
                    .cloned()
                    .ok_or_else(|| ContentError::UnknownCard(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut enemies_by_tier: BTreeMap<Tier, Vec<EnemyRecord>> = BTreeMap::new();
        for enemy in &pack.enemies {
            enemies_by_tier
                .entry(enemy.tier)
                .or_default()
                .push(enemy.clone());
        }
        for tier in [Tier::Normal, Tier::Elite, Tier::Boss] {
            if enemies_by_tier.get(&tier).is_none_or(Vec::is_empty) {
                return Err(ContentError::EmptyTier(tier));
            }
        }

        let reward_pool: Vec<CardRecord> = pack
            .cards
            .iter()
            .filter(|card| card.is_rewardable())
            .cloned()
            .collect();
        let mut cards_by_rarity: BTreeMap<Rarity, Vec<CardRecord>> = BTreeMap::new();
        for card in &reward_pool {
            cards_by_rarity
                .entry(card.rarity())
                .or_default()
                .push(card.clone());
        }

        let mut blessings_by_rarity: BTreeMap<Rarity, Vec<BlessingRecord>> = BTreeMap::new();
        for blessing in &pack.blessings {
            blessings_by_rarity
                .entry(blessing.rarity())
                .or_default()
                .push(blessing.clone());
        }

        Ok(Self {
            pack_id: pack.id,
            cards: pack.cards,
            enemies: pack.enemies,
            blessings: pack.blessings,
            equipment: pack.equipment,
            starter_deck,
            reward_pool,
            cards_by_rarity,
            enemies_by_tier,
            blessings_by_rarity,
        })
    }

    pub fn pack_id(&self) -> &str {
        &self.pack_id
    }
}

fn ensure_unique<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ContentError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::DuplicateId {
                table,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

impl ContentOracle for ContentSnapshot {
    fn card(&self, id: &str) -> Option<&CardRecord> {
        self.cards.iter().find(|card| card.id == id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyRecord> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    fn blessing(&self, id: &str) -> Option<&BlessingRecord> {
        self.blessings.iter().find(|blessing| blessing.id == id)
    }

    fn equipment(&self, id: &str) -> Option<&EquipmentRecord> {
        self.equipment.iter().find(|item| item.id == id)
    }

    fn starter_deck(&self) -> &[CardRecord] {
        &self.starter_deck
    }

    fn reward_pool(&self) -> &[CardRecord] {
        &self.reward_pool
    }

    fn cards_by_rarity(&self, rarity: Rarity) -> &[CardRecord] {
        self.cards_by_rarity
            .get(&rarity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn enemies_by_tier(&self, tier: Tier) -> &[EnemyRecord] {
        self.enemies_by_tier
            .get(&tier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn blessings(&self) -> &[BlessingRecord] {
        &self.blessings
    }

    fn blessings_by_rarity(&self, rarity: Rarity) -> &[BlessingRecord] {
        self.blessings_by_rarity
            .get(&rarity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn all_equipment(&self) -> &[EquipmentRecord] {
        &self.equipment
    }
}
