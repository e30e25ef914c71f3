//! Combat card piles and the draw/reshuffle algorithm.

use strum::{AsRefStr, Display, EnumString};

use crate::env::{CardRecord, GeneratorState};

/// A dealt copy of a master-deck card.
///
/// `uid` is assigned when the combat deck is dealt and is unique within
/// that combat, which makes the conservation of cards across piles checkable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstance {
    pub uid: u32,
    pub card: CardRecord,
}

/// Card container addressed by `EventRemoveCard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DeckPile {
    Master,
    Draw,
    Hand,
    Discard,
    Exhaust,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Piles {
    /// Top of the pile is index 0.
    pub draw: Vec<CardInstance>,
    pub hand: Vec<CardInstance>,
    pub discard: Vec<CardInstance>,
    pub exhaust: Vec<CardInstance>,
    /// Number of instances dealt at combat start.
    pub dealt: u32,
}

impl Piles {
    /// Deals the master deck as fresh instances and shuffles it into the draw pile.
    pub fn deal(master: &[CardRecord], rng: &mut GeneratorState) -> Self {
        let mut draw: Vec<CardInstance> = master
            .iter()
            .enumerate()
            .map(|(uid, card)| CardInstance {
                uid: uid as u32,
                card: card.clone(),
            })
            .collect();
        rng.shuffle_in_place(&mut draw);
        Self {
            dealt: draw.len() as u32,
            draw,
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len() + self.exhaust.len()
    }

    pub fn is_fresh(&self) -> bool {
        self.draw.is_empty() && self.hand.is_empty()
    }

    /// Draws a single card, reshuffling discard into draw when needed.
    ///
    /// Returns `false` when both draw and discard are empty.
    pub fn draw_one(&mut self, rng: &mut GeneratorState) -> bool {
        if self.draw.is_empty() {
            if self.discard.is_empty() {
                return false;
            }
            let mut recycled = std::mem::take(&mut self.discard);
            rng.shuffle_in_place(&mut recycled);
            self.draw = recycled;
        }
        let card = self.draw.remove(0);
        self.hand.push(card);
        true
    }

    /// Draws until the hand holds `target` cards or the piles run dry.
    pub fn draw_to(&mut self, target: usize, rng: &mut GeneratorState) -> usize {
        let mut drawn = 0;
        while self.hand.len() < target && self.draw_one(rng) {
            drawn += 1;
        }
        drawn
    }

    pub fn draw_n(&mut self, count: usize, rng: &mut GeneratorState) -> usize {
        let target = self.hand.len() + count;
        self.draw_to(target, rng)
    }

    /// All instance ids currently held, sorted.
    pub fn uids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .draw
            .iter()
            .chain(&self.hand)
            .chain(&self.discard)
            .chain(&self.exhaust)
            .map(|instance| instance.uid)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// True when every dealt instance is present exactly once.
    pub fn is_conserved(&self) -> bool {
        self.uids().into_iter().eq(0..self.dealt)
    }

    pub fn pile_mut(&mut self, pile: DeckPile) -> Option<&mut Vec<CardInstance>> {
        match pile {
            DeckPile::Master => None,
            DeckPile::Draw => Some(&mut self.draw),
            DeckPile::Hand => Some(&mut self.hand),
            DeckPile::Discard => Some(&mut self.discard),
            DeckPile::Exhaust => Some(&mut self.exhaust),
        }
    }
}
