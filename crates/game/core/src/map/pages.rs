//! Linear "pages" progression backed by a consumable token pool.
//!
//! Each page offers exactly three choices. Offer generation guarantees a
//! boss once monsters run out (or on the final page), at least one monster
//! while any remain, and never two offers of the same kind on one page.

use arrayvec::ArrayVec;
use strum::{AsRefStr, Display, EnumString};

use crate::config::{GameConfig, PagesConfig, TokenCounts};
use crate::env::{GeneratorState, Tier};
use crate::state::ShopKind;

pub type PageOffers = ArrayVec<OfferKind, { GameConfig::PAGE_OFFERS }>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum OfferKind {
    MonsterNormal,
    MonsterElite,
    Boss,
    ShopCard,
    ShopRemove,
    ShopUpgrade,
    Well,
    NextEvent,
}

impl OfferKind {
    pub const fn combat_tier(self) -> Option<Tier> {
        match self {
            Self::MonsterNormal => Some(Tier::Normal),
            Self::MonsterElite => Some(Tier::Elite),
            Self::Boss => Some(Tier::Boss),
            _ => None,
        }
    }

    pub const fn shop_kind(self) -> Option<ShopKind> {
        match self {
            Self::ShopCard => Some(ShopKind::Card),
            Self::ShopRemove => Some(ShopKind::Remove),
            Self::ShopUpgrade => Some(ShopKind::Upgrade),
            _ => None,
        }
    }
}

/// Fill order used when weighted sampling cannot complete a page.
const FALLBACK: [OfferKind; 4] = [
    OfferKind::Well,
    OfferKind::ShopCard,
    OfferKind::ShopRemove,
    OfferKind::ShopUpgrade,
];

impl TokenCounts {
    /// Token count (or weight) for an offer kind. The boss has no token.
    pub const fn get(&self, kind: OfferKind) -> u32 {
        match kind {
            OfferKind::MonsterNormal => self.monster_normal,
            OfferKind::MonsterElite => self.monster_elite,
            OfferKind::ShopCard => self.shop_card,
            OfferKind::ShopRemove => self.shop_remove,
            OfferKind::ShopUpgrade => self.shop_upgrade,
            OfferKind::Well => self.well,
            OfferKind::NextEvent => self.next_event,
            OfferKind::Boss => 0,
        }
    }

    /// Consumes one token, saturating at zero.
    pub fn take(&mut self, kind: OfferKind) {
        let slot = match kind {
            OfferKind::MonsterNormal => &mut self.monster_normal,
            OfferKind::MonsterElite => &mut self.monster_elite,
            OfferKind::ShopCard => &mut self.shop_card,
            OfferKind::ShopRemove => &mut self.shop_remove,
            OfferKind::ShopUpgrade => &mut self.shop_upgrade,
            OfferKind::Well => &mut self.well,
            OfferKind::NextEvent => &mut self.next_event,
            OfferKind::Boss => return,
        };
        *slot = slot.saturating_sub(1);
    }

    pub const fn monsters(&self) -> u32 {
        self.monster_normal + self.monster_elite
    }
}

/// Rolls the offers of one page without touching the pool.
pub fn roll_page(
    rng: GeneratorState,
    pool: &TokenCounts,
    weights: &TokenCounts,
    pages_left: u32,
) -> (GeneratorState, PageOffers) {
    let mut rng = rng;
    let offers = roll_offers(&mut rng, pool, weights, pages_left);
    (rng, offers)
}

fn roll_offers(
    rng: &mut GeneratorState,
    pool: &TokenCounts,
    weights: &TokenCounts,
    pages_left: u32,
) -> PageOffers {
    let mut offers = PageOffers::new();
    let monsters_left = pool.monsters();

    if monsters_left == 0 || pages_left <= 1 {
        offers.push(OfferKind::Boss);
    } else if pool.monster_normal > 0 {
        offers.push(OfferKind::MonsterNormal);
    } else {
        offers.push(OfferKind::MonsterElite);
    }

    let mut candidates: Vec<(OfferKind, u32)> = [
        OfferKind::MonsterNormal,
        OfferKind::MonsterElite,
        OfferKind::ShopCard,
        OfferKind::ShopRemove,
        OfferKind::ShopUpgrade,
        OfferKind::Well,
        OfferKind::NextEvent,
    ]
    .into_iter()
    .filter(|kind| pool.get(*kind) > 0)
    .filter(|kind| match kind {
        OfferKind::MonsterElite => pool.monster_normal == 0,
        OfferKind::NextEvent => pages_left > monsters_left + 1,
        _ => true,
    })
    .map(|kind| (kind, weights.get(kind).max(1)))
    .collect();

    while !offers.is_full() && !candidates.is_empty() {
        let total: u32 = candidates.iter().map(|(_, weight)| weight).sum();
        let roll = rng.draw_int(0, total - 1);
        let mut acc = 0;
        let picked = candidates
            .iter()
            .position(|(_, weight)| {
                acc += weight;
                roll < acc
            })
            .unwrap_or(candidates.len() - 1);
        let (kind, _) = candidates.remove(picked);
        if !offers.contains(&kind) {
            offers.push(kind);
        }
    }

    for kind in FALLBACK {
        if offers.is_full() {
            break;
        }
        if !offers.contains(&kind) {
            offers.push(kind);
        }
    }

    offers
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum SlotStatus {
    Open,
    Used,
    Dismissed,
    /// Visited without effect; the token stays spent.
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OfferSlot {
    pub kind: OfferKind,
    pub status: SlotStatus,
}

impl OfferSlot {
    pub fn is_resolved(&self) -> bool {
        self.status != SlotStatus::Open
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    pub index: u32,
    pub slots: ArrayVec<OfferSlot, { GameConfig::PAGE_OFFERS }>,
}

impl Page {
    pub fn all_resolved(&self) -> bool {
        self.slots.iter().all(OfferSlot::is_resolved)
    }

    pub fn describe(&self) -> String {
        let offers: Vec<String> = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| format!("{i}:{}({})", slot.kind, slot.status))
            .collect();
        format!("Page {}: {}", self.index + 1, offers.join(", "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagesMap {
    pub total_pages: u32,
    pub page_index: u32,
    pub pool: TokenCounts,
    pub page: Option<Page>,
    /// Slot whose shop or well is currently open.
    pub active_offer: Option<usize>,
}

impl PagesMap {
    pub fn new(config: &PagesConfig) -> Self {
        Self {
            total_pages: config.total_pages.max(1),
            page_index: 0,
            pool: config.tokens,
            page: None,
            active_offer: None,
        }
    }

    pub fn pages_left(&self) -> u32 {
        self.total_pages.saturating_sub(self.page_index)
    }

    /// Rolls and opens the page at the current index.
    pub fn open_page(&mut self, rng: &mut GeneratorState, weights: &TokenCounts) -> &Page {
        let offers = roll_offers(rng, &self.pool, weights, self.pages_left());
        self.active_offer = None;
        self.page.insert(Page {
            index: self.page_index,
            slots: offers
                .into_iter()
                .map(|kind| OfferSlot {
                    kind,
                    status: SlotStatus::Open,
                })
                .collect(),
        })
    }

    /// Moves to the next page and opens it. The page index never passes the final page.
    pub fn advance(&mut self, rng: &mut GeneratorState, weights: &TokenCounts) -> &Page {
        self.page_index = (self.page_index + 1).min(self.total_pages.saturating_sub(1));
        self.open_page(rng, weights)
    }

    pub fn slot(&self, index: usize) -> Option<&OfferSlot> {
        self.page.as_ref().and_then(|page| page.slots.get(index))
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut OfferSlot> {
        self.page.as_mut().and_then(|page| page.slots.get_mut(index))
    }

    /// Resolves the bookmarked slot, if any, and clears the bookmark.
    pub fn resolve_active(&mut self, status: SlotStatus) -> Option<OfferKind> {
        let index = self.active_offer.take()?;
        let slot = self.slot_mut(index)?;
        slot.status = status;
        Some(slot.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> TokenCounts {
        PagesConfig::default().weights
    }

    fn assert_unique(offers: &PageOffers) {
        for (i, a) in offers.iter().enumerate() {
            for b in offers.iter().skip(i + 1) {
                assert_ne!(a, b, "duplicate offer in {offers:?}");
            }
        }
    }

    #[test]
    fn fresh_pool_forces_a_normal_monster() {
        let pool = PagesConfig::default().tokens;
        for seed in 1..200 {
            let (_, offers) = roll_page(GeneratorState::from_raw(seed), &pool, &weights(), 12);
            assert_eq!(offers.len(), 3);
            assert_eq!(offers[0], OfferKind::MonsterNormal);
            assert!(!offers.contains(&OfferKind::MonsterElite));
            assert_unique(&offers);
        }
    }

    #[test]
    fn exhausted_monsters_force_the_boss() {
        let pool = TokenCounts {
            monster_normal: 0,
            monster_elite: 0,
            ..PagesConfig::default().tokens
        };
        let (_, offers) = roll_page(GeneratorState::seed("boss"), &pool, &weights(), 6);
        assert_eq!(offers[0], OfferKind::Boss);
        assert_unique(&offers);
    }

    #[test]
    fn final_page_forces_the_boss() {
        let pool = PagesConfig::default().tokens;
        let (_, offers) = roll_page(GeneratorState::seed("last"), &pool, &weights(), 1);
        assert_eq!(offers[0], OfferKind::Boss);
        assert!(!offers.contains(&OfferKind::NextEvent));
    }

    #[test]
    fn elite_is_forced_once_normals_run_out() {
        let pool = TokenCounts {
            monster_normal: 0,
            ..PagesConfig::default().tokens
        };
        let (_, offers) = roll_page(GeneratorState::seed("elite"), &pool, &weights(), 8);
        assert_eq!(offers[0], OfferKind::MonsterElite);
    }

    #[test]
    fn empty_pool_falls_back_without_duplicates() {
        let pool = TokenCounts {
            monster_normal: 1,
            monster_elite: 0,
            shop_card: 0,
            shop_remove: 0,
            shop_upgrade: 0,
            well: 0,
            next_event: 0,
        };
        let (_, offers) = roll_page(GeneratorState::seed("dry"), &pool, &weights(), 5);
        assert_eq!(
            offers.as_slice(),
            &[OfferKind::MonsterNormal, OfferKind::Well, OfferKind::ShopCard]
        );
    }

    #[test]
    fn next_event_requires_spare_pages() {
        let pool = PagesConfig::default().tokens;
        // 8 monsters left, 9 pages left: 9 > 9 is false
        for seed in 1..100 {
            let (_, offers) = roll_page(GeneratorState::from_raw(seed), &pool, &weights(), 9);
            assert!(!offers.contains(&OfferKind::NextEvent));
        }
    }

    #[test]
    fn tokens_saturate() {
        let mut pool = TokenCounts {
            well: 1,
            ..TokenCounts::default()
        };
        pool.take(OfferKind::Well);
        pool.take(OfferKind::Well);
        pool.take(OfferKind::Boss);
        assert_eq!(pool.well, 0);
    }

    #[test]
    fn resolving_the_bookmark_clears_it() {
        let mut pages = PagesMap::new(&PagesConfig::default());
        let mut rng = GeneratorState::seed("bookmark");
        pages.open_page(&mut rng, &weights());
        pages.active_offer = Some(1);
        assert!(pages.resolve_active(SlotStatus::Closed).is_some());
        assert_eq!(pages.slot(1).map(|s| s.status), Some(SlotStatus::Closed));
        assert!(pages.active_offer.is_none());
        assert!(pages.resolve_active(SlotStatus::Used).is_none());
    }

    #[test]
    fn advance_holds_a_zero_page_map_on_its_first_page() {
        let mut pages = PagesMap {
            total_pages: 0,
            ..PagesMap::new(&PagesConfig::default())
        };
        let mut rng = GeneratorState::seed("empty-book");
        pages.advance(&mut rng, &weights());
        assert_eq!(pages.page_index, 0);
        assert!(pages.page.is_some());
    }
}
