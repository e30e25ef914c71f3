//! `CompleteNode`: the phase-keyed close table and the return to the map.

use crate::env::Tier;
use crate::map::{Progression, SlotStatus};
use crate::state::{Phase, PhaseSet};

use super::super::errors::{HandlerResult, Rejection};
use super::super::Ctx;
use super::combat::leave_combat;

type CloseHandler = fn(&mut Ctx<'_, '_>) -> HandlerResult;

/// What `CompleteNode` does, keyed by the phase it is issued from.
const CLOSE_TABLE: [(Phase, CloseHandler); 5] = [
    (Phase::Victory, close_victory),
    (Phase::LevelUp, close_level_up),
    (Phase::Reward, close_reward),
    (Phase::Shop, close_shop),
    (Phase::Event, close_event),
];

pub(in crate::engine) fn closable_phases() -> PhaseSet {
    CLOSE_TABLE
        .iter()
        .fold(PhaseSet::empty(), |set, (phase, _)| set | phase.as_set())
}

pub(super) fn complete_node(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let phase = cx.state.phase;
    let (_, close) = CLOSE_TABLE
        .iter()
        .find(|(entry, _)| *entry == phase)
        .ok_or(Rejection::WrongPhase {
            command: crate::command::CommandTag::CompleteNode,
            phase,
        })?;
    close(cx)
}

fn close_victory(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    leave_combat(cx.state);
    after_victory(cx);
    Ok(())
}

fn close_level_up(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    if cx.state.level_up_pending() {
        return Err(Rejection::LevelUpUnresolved.into());
    }
    cx.state.level_up = None;
    after_victory(cx);
    Ok(())
}

fn close_reward(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    cx.state.reward = None;
    after_victory(cx);
    Ok(())
}

fn close_shop(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let used = cx.state.shop.as_ref().is_some_and(|shop| shop.used);
    if !used && bookmarked(cx) {
        cx.state.log("Shop closed (no purchase)");
    }
    let status = if used {
        SlotStatus::Used
    } else {
        SlotStatus::Closed
    };
    return_to_map(cx, Some(status));
    Ok(())
}

fn close_event(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let status = match cx.state.event.as_ref() {
        Some(event) if event.used => SlotStatus::Used,
        Some(event) if event.dismissed => SlotStatus::Dismissed,
        _ => SlotStatus::Closed,
    };
    return_to_map(cx, Some(status));
    Ok(())
}

fn bookmarked(cx: &Ctx<'_, '_>) -> bool {
    cx.state
        .progression
        .as_ref()
        .and_then(Progression::pages)
        .is_some_and(|pages| pages.active_offer.is_some())
}

/// Next screen after a won combat: level-up, then reward, then map.
///
/// A boss kill has no reward screen and ends the run instead of returning.
fn after_victory(cx: &mut Ctx<'_, '_>) {
    let state = &mut *cx.state;
    if state.level_up_pending() {
        state.phase = Phase::LevelUp;
        return;
    }
    if state.reward.is_some() {
        state.phase = Phase::Reward;
        return;
    }
    if state.encounter == Some(Tier::Boss) {
        finish_run(cx);
        return;
    }
    return_to_map(cx, None);
}

fn finish_run(cx: &mut Ctx<'_, '_>) {
    let state = &mut *cx.state;
    if let Some(grid) = state.progression.as_mut().and_then(Progression::grid_mut) {
        grid.complete_and_advance();
    }
    state.run_complete = true;
    state.phase = Phase::Victory;
    state.log("Run complete!");
}

/// Clears the node's transient screens and moves the progression forward.
///
/// Grid maps complete the entered node. Pages resolve the bookmarked slot
/// with `slot` and turn the page after a fight.
fn return_to_map(cx: &mut Ctx<'_, '_>, slot: Option<SlotStatus>) {
    let weights = cx.env.config().pages.weights;
    let state = &mut *cx.state;
    let fought = state.encounter.take().is_some();
    state.shop = None;
    state.event = None;
    state.reward = None;
    state.level_up = None;
    state.phase = Phase::Map;

    let mut turned = None;
    match state.progression.as_mut() {
        Some(Progression::Grid(grid)) => {
            grid.complete_and_advance();
        }
        Some(Progression::Pages(pages)) => {
            if let Some(status) = slot {
                pages.resolve_active(status);
            }
            if fought {
                turned = Some(pages.advance(cx.rng, &weights).describe());
            }
        }
        None => {}
    }
    if let Some(line) = turned {
        state.log(line);
    }
}
