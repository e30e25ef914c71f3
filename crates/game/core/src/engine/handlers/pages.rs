//! Pages progression: opening pages, choosing and dismissing offers.

use crate::map::{OfferKind, PagesMap, Progression, SlotStatus};
use crate::state::{EventKind, RunState};

use super::super::errors::{HandlerResult, Rejection};
use super::super::Ctx;
use super::{combat, events, shop};

fn pages_mut(state: &mut RunState) -> Result<&mut PagesMap, Rejection> {
    state
        .progression
        .as_mut()
        .and_then(Progression::pages_mut)
        .ok_or(Rejection::NoPageOpen)
}

/// Turns to the next page (or opens the current one) and logs its offers.
fn turn_page(cx: &mut Ctx<'_, '_>, advance: bool) -> HandlerResult {
    let weights = cx.env.config().pages.weights;
    let pages = pages_mut(cx.state)?;
    let page = if advance {
        pages.advance(cx.rng, &weights)
    } else {
        pages.open_page(cx.rng, &weights)
    };
    let line = page.describe();
    cx.state.log(line);
    Ok(())
}

pub(super) fn open_page(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    if pages_mut(cx.state)?.page.is_some() {
        return Err(Rejection::PageAlreadyOpen.into());
    }
    turn_page(cx, false)
}

/// Looks up an unresolved offer on the open page.
fn open_offer(state: &mut RunState, index: usize) -> Result<OfferKind, Rejection> {
    let pages = pages_mut(state)?;
    if pages.page.is_none() {
        return Err(Rejection::NoPageOpen);
    }
    let slot = pages.slot(index).ok_or(Rejection::NoSuchIndex {
        what: "Offer",
        index,
    })?;
    if slot.is_resolved() {
        return Err(Rejection::OfferResolved);
    }
    Ok(slot.kind)
}

/// Spends the offer's token and resolves it. Fights, the boss and "next
/// event" mark the slot used at once; shops and wells bookmark it until
/// `CompleteNode` closes them.
pub(super) fn choose_offer(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    let kind = open_offer(cx.state, index)?;
    let pages = pages_mut(cx.state)?;
    pages.pool.take(kind);
    match kind {
        OfferKind::MonsterNormal | OfferKind::MonsterElite | OfferKind::Boss | OfferKind::NextEvent => {
            mark(pages, index, SlotStatus::Used);
        }
        OfferKind::ShopCard | OfferKind::ShopRemove | OfferKind::ShopUpgrade | OfferKind::Well => {
            pages.active_offer = Some(index);
        }
    }
    cx.state.log(format!("Chose {kind}"));

    if let Some(tier) = kind.combat_tier() {
        return combat::begin_combat(cx, tier);
    }
    match (kind, kind.shop_kind()) {
        (_, Some(shop)) => shop::open_shop(cx, shop),
        (OfferKind::Well, None) => events::open_event(cx, EventKind::Well),
        _ => return turn_page(cx, true),
    }
    Ok(())
}

pub(super) fn dismiss_offer(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    let kind = open_offer(cx.state, index)?;
    if kind == OfferKind::Boss {
        return Err(Rejection::BossNotDismissable.into());
    }
    let pages = pages_mut(cx.state)?;
    pages.pool.take(kind);
    mark(pages, index, SlotStatus::Dismissed);
    cx.state.log(format!("Dismissed {kind}"));
    Ok(())
}

pub(super) fn proceed(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let cleared = pages_mut(cx.state)?
        .page
        .as_ref()
        .map(|page| page.all_resolved())
        .ok_or(Rejection::NoPageOpen)?;
    if !cleared {
        return Err(Rejection::PageNotCleared.into());
    }
    turn_page(cx, true)
}

fn mark(pages: &mut PagesMap, index: usize, status: SlotStatus) {
    if let Some(slot) = pages.slot_mut(index) {
        slot.status = status;
    }
}
