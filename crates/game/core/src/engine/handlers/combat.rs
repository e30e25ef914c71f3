//! Combat: entry, card play, enemy turn and victory detection.

use tracing::debug;

use crate::economy::{grant_exp, roll_reward_options};
use crate::effects::{HookEvent, fire};
use crate::env::Tier;
use crate::state::{Phase, Piles, RewardState, RunState};

use super::super::errors::{HandlerResult, Rejection};
use super::super::Ctx;
use super::at;

/// Spawns an enemy of `tier` and runs the full combat-start sequence.
pub(super) fn begin_combat(cx: &mut Ctx<'_, '_>, tier: Tier) -> HandlerResult {
    let pool = cx.env.content().require_tier(tier)?;
    let enemy = pool[cx.rng.draw_index(pool.len())].spawn();

    cx.state.log(format!(
        "A {} appears ({} hp)",
        enemy.name,
        enemy.current_hp()
    ));
    debug!(target: "core::engine", enemy = %enemy.id, %tier, "combat begins");

    cx.state.enemy = Some(enemy);
    cx.state.encounter = Some(tier);
    cx.state.combat_victory_lock = false;
    cx.state.phase = Phase::Combat;
    open_first_turn(cx);
    Ok(())
}

/// Turn 1 setup: deal, draw, clear gates, fire equip and turn-start hooks.
fn open_first_turn(cx: &mut Ctx<'_, '_>) {
    let state = &mut *cx.state;
    state.turn = 1;
    state.player.energy = state.player.max_energy;
    state.player.block = 0;
    state.piles = Piles::deal(&state.master_deck, cx.rng);
    state.piles.draw_to(state.player.max_hand_size as usize, cx.rng);
    state.turn_flags.reset();

    fire(state, cx.rng, HookEvent::Equip);
    fire(state, cx.rng, HookEvent::TurnStart);
    check_victory(cx);
}

/// Initialises a combat whose enemy is present but whose deck was never dealt.
///
/// Combat entry already performs this, so the command only does work on
/// states that arrive in combat without a first turn.
pub(super) fn start_combat(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    if cx.state.enemy.is_none() {
        return Err(Rejection::NoEnemy.into());
    }
    if cx.state.turn != 0 || !cx.state.piles.is_fresh() || cx.state.piles.dealt != 0 {
        return Err(Rejection::CombatAlreadyStarted.into());
    }
    open_first_turn(cx);
    Ok(())
}

pub(super) fn play_card(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    if cx.state.combat_victory_lock {
        return Err(Rejection::CombatLocked.into());
    }
    let cost = at(&cx.state.piles.hand, index, "Hand")?.card.cost;
    if cx.state.player.energy < cost {
        return Err(Rejection::NotEnoughEnergy { need: cost }.into());
    }

    let state = &mut *cx.state;
    state.player.energy -= cost;
    let played = state.piles.hand.remove(index);
    let card = played.card.clone();

    if let Some(damage) = card.damage {
        if let Some(enemy) = state.enemy.as_mut() {
            enemy.take_damage(damage);
        }
    }
    if let Some(block) = card.block {
        state.player.block = block;
    }
    if let Some(gain) = card.energy_gain {
        state.player.energy = state.player.energy.saturating_add(gain);
    }
    if let Some(heal) = card.heal {
        state.player.heal(heal);
    }
    state.log(format!("Played {}", card.name));

    fire(state, cx.rng, HookEvent::CardPlayed(&card));

    if card.exhaust {
        state.piles.exhaust.push(played);
    } else {
        state.piles.discard.push(played);
    }
    if let Some(bonus) = card.draw {
        state.piles.draw_n(bonus as usize, cx.rng);
    }

    check_victory(cx);
    Ok(())
}

pub(super) fn end_turn(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    if cx.state.combat_victory_lock {
        return Err(Rejection::CombatLocked.into());
    }
    let state = &mut *cx.state;
    let Some(enemy) = state.enemy.as_ref() else {
        return Err(Rejection::NoEnemy.into());
    };
    let (name, damage) = (enemy.name.clone(), enemy.damage);

    let lost = state.player.absorb_hit(damage);
    state.log(format!("{name} hits for {lost}"));
    if state.player.is_dead() {
        declare_defeat(state);
        return Ok(());
    }

    fire(state, cx.rng, HookEvent::TurnEnd);
    if check_victory(cx) {
        return Ok(());
    }

    let state = &mut *cx.state;
    state.turn += 1;
    state.player.energy = state.player.max_energy;
    state.player.block = 0;
    state.piles.draw_to(state.player.max_hand_size as usize, cx.rng);
    state.turn_flags.reset();
    fire(state, cx.rng, HookEvent::TurnStart);
    check_victory(cx);
    Ok(())
}

pub(super) fn declare_defeat(state: &mut RunState) {
    state.phase = Phase::Defeat;
    state.log("Defeat...");
}

/// Declares victory once the enemy is dead; returns whether it did.
///
/// Grants the tier's EXP and, outside boss fights, rolls the card reward.
/// The lock guarantees this runs at most once per combat.
pub(super) fn check_victory(cx: &mut Ctx<'_, '_>) -> bool {
    let dead = cx.state.enemy.as_ref().is_some_and(|enemy| enemy.is_dead());
    if !dead || cx.state.combat_victory_lock {
        return false;
    }

    let content = cx.env.content();
    let config = cx.env.config();
    let tier = cx.state.encounter.unwrap_or(Tier::Normal);

    cx.state.combat_victory_lock = true;
    cx.state.phase = Phase::Victory;
    cx.state.log("Victory!");

    grant_exp(
        cx.state,
        cx.rng,
        content,
        config,
        config.leveling.exp_for(tier),
    );
    if tier != Tier::Boss {
        let options = roll_reward_options(cx.rng, content, &config.economy, tier);
        cx.state.reward = Some(RewardState::new(options));
    }
    true
}

/// Tears down the per-combat state once the victory screen is left.
pub(super) fn leave_combat(state: &mut RunState) {
    state.piles.clear();
    state.enemy = None;
    state.turn = 0;
    state.player.block = 0;
    state.player.energy = state.player.max_energy;
    state.combat_victory_lock = false;
    state.turn_flags.reset();
}
