//! Card reward and shop stock rolls.
//!
//! Both roll rarity first, then pick a card of that rarity that has not
//! been chosen yet in the same roll. When the rolled rarity is exhausted
//! the pick falls back to any unchosen card of the pool.

use crate::config::EconomyConfig;
use crate::env::{CardRecord, ContentOracle, GeneratorState, Rarity, Tier};
use crate::state::ShopItem;

fn unpicked<'a>(pool: &'a [CardRecord], picked: &[CardRecord]) -> Vec<&'a CardRecord> {
    pool.iter()
        .filter(|card| !picked.iter().any(|chosen| chosen.id == card.id))
        .collect()
}

fn draw_uniform(
    rng: &mut GeneratorState,
    pool: &[CardRecord],
    picked: &[CardRecord],
) -> Option<CardRecord> {
    let remaining = unpicked(pool, picked);
    if remaining.is_empty() {
        return None;
    }
    Some(remaining[rng.draw_index(remaining.len())].clone())
}

fn draw_weighted(
    rng: &mut GeneratorState,
    pool: &[CardRecord],
    picked: &[CardRecord],
    favored_weight: u32,
) -> Option<CardRecord> {
    let remaining = unpicked(pool, picked);
    let weight = |card: &CardRecord| {
        if card.favored_in_shop {
            favored_weight.max(1)
        } else {
            1
        }
    };
    let total: u32 = remaining.iter().map(|card| weight(card)).sum();
    if total == 0 {
        return None;
    }
    let roll = rng.draw_int(0, total - 1);
    let mut acc = 0;
    remaining
        .into_iter()
        .find(|card| {
            acc += weight(card);
            roll < acc
        })
        .cloned()
}

/// Rolls the card options offered after a victory of the given tier.
///
/// Never returns the same card id twice. A boss roll without a rare card
/// has its first slot replaced by a rare one when the pool has any.
pub fn roll_reward_options(
    rng: &mut GeneratorState,
    content: &dyn ContentOracle,
    economy: &EconomyConfig,
    tier: Tier,
) -> Vec<CardRecord> {
    let weights = economy.reward_weights(tier);
    let mut picked: Vec<CardRecord> = Vec::new();

    for _ in 0..economy.reward_count(tier) {
        let rarity = weights.pick(rng.draw_int(1, weights.total()));
        let card = draw_uniform(rng, content.cards_by_rarity(rarity), &picked)
            .or_else(|| draw_uniform(rng, content.reward_pool(), &picked));
        match card {
            Some(card) => picked.push(card),
            None => break,
        }
    }

    let has_rare = picked.iter().any(|card| card.rarity() == Rarity::Rare);
    if tier == Tier::Boss && !has_rare {
        if let Some(rare) = draw_uniform(rng, content.cards_by_rarity(Rarity::Rare), &picked) {
            match picked.first_mut() {
                Some(first) => *first = rare,
                None => picked.push(rare),
            }
        }
    }

    picked
}

/// Rarity base price scaled by act.
pub fn price_for(economy: &EconomyConfig, rarity: Rarity, act: u32) -> u32 {
    let base = f64::from(economy.base_price(rarity));
    let scale = 1.0 + economy.price_act_step * f64::from(act.saturating_sub(1));
    (base * scale).round() as u32
}

/// Rolls a shuffled, priced card-shop stock.
pub fn roll_shop_stock(
    rng: &mut GeneratorState,
    content: &dyn ContentOracle,
    economy: &EconomyConfig,
    act: u32,
) -> Vec<ShopItem> {
    let weights = economy.shop_weights;
    let mut picked: Vec<CardRecord> = Vec::new();

    for _ in 0..economy.shop_stock_size {
        let rarity = weights.pick(rng.draw_int(1, weights.total()));
        let card = draw_weighted(
            rng,
            content.cards_by_rarity(rarity),
            &picked,
            economy.shop_favored_weight,
        )
        .or_else(|| draw_weighted(rng, content.reward_pool(), &picked, economy.shop_favored_weight));
        match card {
            Some(card) => picked.push(card),
            None => break,
        }
    }

    rng.shuffle_in_place(&mut picked);
    picked
        .into_iter()
        .map(|card| ShopItem {
            price: price_for(economy, card.rarity(), act),
            card,
            sold: false,
        })
        .collect()
}
