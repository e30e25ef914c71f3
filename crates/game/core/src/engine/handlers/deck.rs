//! Master-deck edits shared by shops, events and level-ups; loadout and deck view.

use crate::env::CardRecord;
use crate::state::RunState;

use super::super::errors::{HandlerResult, Rejection};
use super::super::Ctx;
use super::at;

pub(super) fn check_removable(
    state: &RunState,
    index: usize,
    what: &'static str,
) -> Result<(), Rejection> {
    at(&state.master_deck, index, what)?;
    if state.master_deck.len() <= 1 {
        return Err(Rejection::LastCard);
    }
    Ok(())
}

pub(super) fn remove_master_card(
    state: &mut RunState,
    index: usize,
    what: &'static str,
) -> Result<CardRecord, Rejection> {
    check_removable(state, index, what)?;
    state.counters.cards_removed += 1;
    Ok(state.master_deck.remove(index))
}

pub(super) fn check_upgradable(
    state: &RunState,
    index: usize,
    what: &'static str,
) -> Result<(), Rejection> {
    let card = at(&state.master_deck, index, what)?;
    if card.upgraded {
        return Err(Rejection::AlreadyUpgraded(card.name.clone()));
    }
    Ok(())
}

/// Upgrades a master-deck card in place and returns its new name.
pub(super) fn upgrade_master_card(
    state: &mut RunState,
    index: usize,
    what: &'static str,
) -> Result<String, Rejection> {
    check_upgradable(state, index, what)?;
    let card = &mut state.master_deck[index];
    card.upgrade();
    Ok(card.name.clone())
}

pub(super) fn equip(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    let loadout = &mut cx.state.loadout;
    let name = loadout
        .equip_from_backpack(index)
        .map(|item| item.name.clone())
        .ok_or(Rejection::NoSuchIndex {
            what: "Backpack",
            index,
        })?;
    let active = loadout.is_active(loadout.equipped.len() - 1);
    let line = if active {
        format!("Equipped {name}")
    } else {
        format!("Equipped {name} (inert: no free slots)")
    };
    cx.state.log(line);
    Ok(())
}

pub(super) fn unequip(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    let name = cx
        .state
        .loadout
        .unequip(index)
        .map(|item| item.name.clone())
        .ok_or(Rejection::NoSuchIndex {
            what: "Equipment",
            index,
        })?;
    cx.state.log(format!("Unequipped {name}"));
    Ok(())
}

pub(super) fn set_deck_view(cx: &mut Ctx<'_, '_>, open: bool) -> HandlerResult {
    if cx.state.deck_open == open {
        return Err(Rejection::DeckView(if open { "open" } else { "closed" }).into());
    }
    cx.state.deck_open = open;
    Ok(())
}
