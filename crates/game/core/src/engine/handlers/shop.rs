//! Card, remove and upgrade shops.

use crate::economy::{remove_cost, roll_shop_stock, upgrade_cost};
use crate::state::{Phase, ShopKind, ShopState};

use super::super::errors::{HandlerResult, Rejection};
use super::super::Ctx;
use super::{at, deck};

pub(super) fn open_shop(cx: &mut Ctx<'_, '_>, kind: ShopKind) {
    let stock = match kind {
        ShopKind::Card => roll_shop_stock(
            cx.rng,
            cx.env.content(),
            &cx.env.config().economy,
            cx.state.act,
        ),
        ShopKind::Remove | ShopKind::Upgrade => Vec::new(),
    };
    cx.state.shop = Some(ShopState::new(kind, stock));
    cx.state.phase = Phase::Shop;
    cx.state.log(format!("Shop opened ({kind})"));
}

fn require_kind(cx: &Ctx<'_, '_>, kind: ShopKind) -> Result<(), Rejection> {
    match cx.state.shop.as_ref() {
        Some(shop) if shop.kind == kind => Ok(()),
        _ => Err(Rejection::WrongShop(kind)),
    }
}

pub(super) fn take_shop(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    require_kind(cx, ShopKind::Card)?;
    let state = &mut *cx.state;
    let Some(shop) = state.shop.as_mut() else {
        return Err(Rejection::WrongShop(ShopKind::Card).into());
    };
    let item = at(&shop.stock, index, "Shop")?;
    if item.sold {
        return Err(Rejection::AlreadySold.into());
    }
    if !state.player.try_spend_gold(item.price) {
        return Err(Rejection::ShopNotEnoughGold.into());
    }

    let item = &mut shop.stock[index];
    item.sold = true;
    shop.used = true;
    let (card, price) = (item.card.clone(), item.price);
    state.log(format!("Shop: bought {} for {price}g", card.name));
    state.master_deck.push(card);
    state.counters.shop_cards += 1;
    Ok(())
}

pub(super) fn reroll(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    require_kind(cx, ShopKind::Card)?;
    let economy = &cx.env.config().economy;
    if !cx.state.player.try_spend_gold(economy.reroll_cost) {
        return Err(Rejection::RerollNotEnoughGold.into());
    }

    let stock = roll_shop_stock(cx.rng, cx.env.content(), economy, cx.state.act);
    if let Some(shop) = cx.state.shop.as_mut() {
        shop.stock = stock;
    }
    cx.state.counters.rerolls += 1;
    cx.state
        .log(format!("Shop: rerolled (-{}g)", economy.reroll_cost));
    Ok(())
}

pub(super) fn remove_buy(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    require_kind(cx, ShopKind::Remove)?;
    let cost = remove_cost(&cx.env.config().economy, cx.state.counters.shop_removals);
    deck::check_removable(cx.state, index, "Deck")?;
    if !cx.state.player.try_spend_gold(cost) {
        return Err(Rejection::RemoveNotEnoughGold { cost }.into());
    }

    let card = deck::remove_master_card(cx.state, index, "Deck")?;
    cx.state.counters.shop_removals += 1;
    mark_used(cx);
    cx.state
        .log(format!("Remove shop: removed {} ({cost}g)", card.name));
    Ok(())
}

pub(super) fn upgrade_buy(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    require_kind(cx, ShopKind::Upgrade)?;
    let cost = upgrade_cost(&cx.env.config().economy, cx.state.counters.shop_upgrades);
    deck::check_upgradable(cx.state, index, "Deck")?;
    if !cx.state.player.try_spend_gold(cost) {
        return Err(Rejection::UpgradeNotEnoughGold { cost }.into());
    }

    let name = deck::upgrade_master_card(cx.state, index, "Deck")?;
    cx.state.counters.shop_upgrades += 1;
    mark_used(cx);
    cx.state.log(format!("Upgrade shop: {name} ({cost}g)"));
    Ok(())
}

fn mark_used(cx: &mut Ctx<'_, '_>) {
    if let Some(shop) = cx.state.shop.as_mut() {
        shop.used = true;
    }
}
