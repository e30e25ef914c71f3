//! Shrine, remove, gamble, treasure, bonfire and well events.

use crate::economy::roll_shrine;
use crate::state::{DeckPile, EventKind, EventState, Phase};

use super::super::errors::{HandlerResult, Rejection};
use super::super::Ctx;
use super::{at, combat, deck};

pub(super) fn open_event(cx: &mut Ctx<'_, '_>, kind: EventKind) {
    let event = match kind {
        EventKind::Shrine => EventState::shrine(roll_shrine(
            cx.rng,
            cx.env.content(),
            &cx.env.config().events,
            &cx.state.blessings,
        )),
        _ => EventState::new(kind),
    };
    cx.state.event = Some(event);
    cx.state.phase = Phase::Event;
    cx.state.log(format!("Event: {kind}"));
}

/// The open event, if it is of `kind` and still unspent.
fn require_open<'a>(
    cx: &'a mut Ctx<'_, '_>,
    kind: EventKind,
) -> Result<&'a mut EventState, Rejection> {
    match cx.state.event.as_mut() {
        Some(event) if event.kind != kind => Err(Rejection::WrongEvent(kind)),
        Some(event) if event.is_spent() => Err(Rejection::EventSpent),
        Some(event) => Ok(event),
        None => Err(Rejection::WrongEvent(kind)),
    }
}

pub(super) fn bonfire_heal(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let amount = cx.env.config().events.bonfire_heal;
    require_open(cx, EventKind::Bonfire)?.used = true;
    let healed = cx.state.player.heal(amount);
    cx.state.log(format!("Bonfire: healed +{healed}"));
    Ok(())
}

pub(super) fn well_use(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let amount = cx.env.config().events.well_heal;
    require_open(cx, EventKind::Well)?.used = true;
    let healed = cx.state.player.heal(amount);
    cx.state.log(format!("Well: healed +{healed}"));
    Ok(())
}

pub(super) fn well_dismiss(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    require_open(cx, EventKind::Well)?.dismissed = true;
    cx.state.log("Well: dismissed");
    Ok(())
}

pub(super) fn choose_blessing(cx: &mut Ctx<'_, '_>, index: usize) -> HandlerResult {
    let event = require_open(cx, EventKind::Shrine)?;
    let blessing = at(&event.shrine_options, index, "Shrine")?.clone();
    if cx.state.owns_blessing(&blessing.id) {
        return Err(Rejection::BlessingOwned.into());
    }
    if let Some(event) = cx.state.event.as_mut() {
        event.used = true;
    }
    cx.state.log(format!("Shrine: gained {}", blessing.name));
    cx.state.blessings.push(blessing);
    Ok(())
}

/// Removes one card. Combat piles are addressable, but outside combat only
/// the master deck holds cards.
pub(super) fn remove_card(cx: &mut Ctx<'_, '_>, pile: DeckPile, index: usize) -> HandlerResult {
    let cap = cx.env.config().events.remove_cap_per_run;
    require_open(cx, EventKind::Remove)?;
    if cx.state.counters.event_removals >= cap {
        return Err(Rejection::RemoveCapReached { cap }.into());
    }

    let state = &mut *cx.state;
    let card = match state.piles.pile_mut(pile) {
        None => deck::remove_master_card(state, index, "Deck")?,
        Some(cards) => {
            if index >= cards.len() {
                return Err(Rejection::NoSuchIndex {
                    what: "Pile",
                    index,
                }
                .into());
            }
            let instance = cards.remove(index);
            if let Some(slot) = state
                .master_deck
                .iter()
                .position(|card| card.id == instance.card.id)
            {
                state.master_deck.remove(slot);
            }
            state.counters.cards_removed += 1;
            instance.card
        }
    };

    state.counters.event_removals += 1;
    if let Some(event) = state.event.as_mut() {
        event.used = true;
    }
    state.log(format!("Removed {} from {pile}", card.name));
    Ok(())
}

pub(super) fn gamble(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let events = &cx.env.config().events;
    require_open(cx, EventKind::Gamble)?.used = true;

    if cx.rng.draw_int(0, 1) == 1 {
        cx.state.player.gold = cx.state.player.gold.saturating_add(events.gamble_win_gold);
        cx.state
            .log(format!("Gamble: won +{} gold", events.gamble_win_gold));
    } else {
        cx.state.player.lose_hp(events.gamble_loss_hp);
        cx.state
            .log(format!("Gamble: lost {} hp", events.gamble_loss_hp));
        if cx.state.player.is_dead() {
            combat::declare_defeat(cx.state);
        }
    }
    Ok(())
}

pub(super) fn treasure(cx: &mut Ctx<'_, '_>) -> HandlerResult {
    let events = &cx.env.config().events;
    require_open(cx, EventKind::Treasure)?.used = true;
    let gold = cx.rng.draw_int(events.treasure_min, events.treasure_max);
    cx.state.player.gold = cx.state.player.gold.saturating_add(gold);
    cx.state.log(format!("Treasure: +{gold} gold"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::command::Command;
    use crate::engine::GameEngine;
    use crate::env::{GameEnv, GeneratorState};
    use crate::state::{DeckPile, EventKind, Phase};
    use crate::test_support::{fixture_content, fresh_run};
    use crate::{GameConfig, RunState};

    fn event_run(engine: &GameEngine<'_>, kind: EventKind) -> RunState {
        let (state, _) = engine
            .apply(&fresh_run(), &Command::QaOpenEvent { kind }, GeneratorState::seed("ev"))
            .unwrap();
        assert_eq!(state.phase, Phase::Event);
        state
    }

    #[test]
    fn bonfire_heals_once() {
        let content = fixture_content();
        let config = GameConfig::default();
        let engine = GameEngine::new(GameEnv::new(&content, &config));
        let mut state = event_run(&engine, EventKind::Bonfire);
        state.player.hp = 20;
        let rng = GeneratorState::seed("fire");

        let (state, rng) = engine.apply(&state, &Command::DoBonfireHeal, rng).unwrap();
        assert_eq!(state.player.hp, 30);
        assert_eq!(state.last_log(), Some("Bonfire: healed +10"));
        let (again, _) = engine.apply(&state, &Command::DoBonfireHeal, rng).unwrap();
        assert_eq!(again.player.hp, 30);
        assert_eq!(again.last_log(), Some("Event already resolved"));
    }

    #[test]
    fn remove_event_is_capped_per_run() {
        let content = fixture_content();
        let config = GameConfig::default();
        let engine = GameEngine::new(GameEnv::new(&content, &config));
        let mut state = event_run(&engine, EventKind::Remove);
        state.counters.event_removals = 2;
        let (next, _) = engine
            .apply(
                &state,
                &Command::EventRemoveCard {
                    pile: DeckPile::Master,
                    index: 0,
                },
                GeneratorState::seed("cap"),
            )
            .unwrap();
        assert_eq!(next.master_deck.len(), state.master_deck.len());
        assert_eq!(next.last_log(), Some("Remove: limit of 2 per run reached"));
    }

    #[test]
    fn remove_event_takes_one_master_card() {
        let content = fixture_content();
        let config = GameConfig::default();
        let engine = GameEngine::new(GameEnv::new(&content, &config));
        let state = event_run(&engine, EventKind::Remove);
        let rng = GeneratorState::seed("rm");
        let remove = Command::EventRemoveCard {
            pile: DeckPile::Master,
            index: 0,
        };

        let (next, rng) = engine.apply(&state, &remove, rng).unwrap();
        assert_eq!(next.master_deck.len(), state.master_deck.len() - 1);
        assert_eq!(next.counters.event_removals, 1);
        let (again, _) = engine.apply(&next, &remove, rng).unwrap();
        assert_eq!(again.master_deck.len(), next.master_deck.len());

        let hand = Command::EventRemoveCard {
            pile: DeckPile::Hand,
            index: 0,
        };
        let (empty, _) = engine.apply(&state, &hand, GeneratorState::seed("h")).unwrap();
        assert_eq!(empty.last_log(), Some("Pile: nothing at index 0"));
    }

    #[test]
    fn gamble_either_pays_or_hurts() {
        let content = fixture_content();
        let config = GameConfig::default();
        let engine = GameEngine::new(GameEnv::new(&content, &config));
        let state = event_run(&engine, EventKind::Gamble);
        for seed in 0..20 {
            let (next, _) = engine
                .apply(&state, &Command::EventGambleRoll, GeneratorState::from_raw(seed))
                .unwrap();
            let won = next.player.gold == state.player.gold + 40 && next.player.hp == state.player.hp;
            let lost = next.player.gold == state.player.gold && next.player.hp == state.player.hp - 10;
            assert!(won ^ lost);
        }
    }

    #[test]
    fn losing_gamble_at_low_hp_is_defeat() {
        let content = fixture_content();
        let config = GameConfig::default();
        let engine = GameEngine::new(GameEnv::new(&content, &config));
        let mut state = event_run(&engine, EventKind::Gamble);
        state.player.hp = 5;
        let outcome = (0..50)
            .map(|seed| {
                engine
                    .apply(&state, &Command::EventGambleRoll, GeneratorState::from_raw(seed))
                    .unwrap()
                    .0
            })
            .find(|next| next.player.hp == 0)
            .expect("some seed loses the gamble");
        assert_eq!(outcome.phase, Phase::Defeat);
    }

    #[test]
    fn treasure_is_within_range() {
        let content = fixture_content();
        let config = GameConfig::default();
        let engine = GameEngine::new(GameEnv::new(&content, &config));
        let state = event_run(&engine, EventKind::Treasure);
        let (next, _) = engine
            .apply(&state, &Command::EventTreasureOpen, GeneratorState::seed("gold"))
            .unwrap();
        let gained = next.player.gold - state.player.gold;
        assert!((30..=80).contains(&gained));
    }

    #[test]
    fn shrine_grants_one_blessing() {
        let content = fixture_content();
        let config = GameConfig::default();
        let engine = GameEngine::new(GameEnv::new(&content, &config));
        let state = event_run(&engine, EventKind::Shrine);
        let options = state.event.as_ref().unwrap().shrine_options.clone();
        assert!(!options.is_empty());
        let rng = GeneratorState::seed("shrine");

        let (next, rng) = engine
            .apply(&state, &Command::EventChooseBlessing { index: 0 }, rng)
            .unwrap();
        assert!(next.owns_blessing(&options[0].id));
        let (again, _) = engine
            .apply(&next, &Command::EventChooseBlessing { index: 0 }, rng)
            .unwrap();
        assert_eq!(again.blessings.len(), next.blessings.len());
    }
}
