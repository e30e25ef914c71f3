//! Blessing and equipment hook runtime.
//!
//! Hooks are collected from held blessings in acquisition order, then from
//! active equipment in equip order. Each one is filtered by its condition,
//! gated once per turn when flagged, and handed to the effect interpreter.
//! A failing hook is logged and skipped; it never aborts the remaining hooks
//! or the command that triggered them.
mod interpret;

pub use interpret::{HookError, apply_effect};

use strum::Display;
use tracing::{debug, warn};

use crate::env::{CardRecord, GeneratorState, HookSpec, Trigger};
use crate::state::RunState;

/// Occasion on which hooks are fired.
#[derive(Clone, Copy, Debug)]
pub enum HookEvent<'a> {
    TurnStart,
    TurnEnd,
    CardPlayed(&'a CardRecord),
    /// Combat begins; equipment `equip` hooks only.
    Equip,
}

impl HookEvent<'_> {
    pub const fn trigger(&self) -> Trigger {
        match self {
            Self::TurnStart => Trigger::TurnStart,
            Self::TurnEnd => Trigger::TurnEnd,
            Self::CardPlayed(_) => Trigger::CardPlayed,
            Self::Equip => Trigger::Equip,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
enum OwnerKind {
    Blessing,
    Equipment,
}

struct BoundHook {
    kind: OwnerKind,
    /// Gate-key prefix; equipment ids are namespaced to avoid clashing with blessings.
    key: String,
    name: String,
    index: usize,
    once_per_turn: bool,
    spec: HookSpec,
}

impl BoundHook {
    fn gate_key(&self) -> String {
        format!("{}:{}#{}", self.key, self.spec.trigger, self.index)
    }
}

fn collect(state: &RunState, trigger: Trigger) -> Vec<BoundHook> {
    let blessings = state.blessings.iter().flat_map(|blessing| {
        blessing
            .hooks
            .iter()
            .enumerate()
            .filter(move |(_, spec)| spec.trigger == trigger)
            .map(move |(index, spec)| BoundHook {
                kind: OwnerKind::Blessing,
                key: blessing.id.clone(),
                name: blessing.name.clone(),
                index,
                once_per_turn: blessing.once_per_turn || spec.once_per_turn,
                spec: spec.clone(),
            })
    });

    let equipment = state.loadout.active().iter().flat_map(|item| {
        item.hooks
            .iter()
            .enumerate()
            .filter(move |(_, spec)| spec.trigger == trigger)
            .map(move |(index, spec)| BoundHook {
                kind: OwnerKind::Equipment,
                key: format!("equip:{}", item.id),
                name: item.name.clone(),
                index,
                once_per_turn: item.once_per_turn || spec.once_per_turn,
                spec: spec.clone(),
            })
    });

    blessings.chain(equipment).collect()
}

/// Fires every hook registered for `event` and returns how many ran successfully.
pub fn fire(state: &mut RunState, rng: &mut GeneratorState, event: HookEvent<'_>) -> usize {
    let trigger = event.trigger();
    let mut succeeded = 0;

    for hook in collect(state, trigger) {
        if let HookEvent::CardPlayed(card) = event {
            if !hook.spec.condition.matches(card) {
                continue;
            }
        }

        // equip hooks fire once per combat and ignore the turn gate
        if hook.once_per_turn && trigger != Trigger::Equip {
            let key = hook.gate_key();
            if !state.turn_flags.claim(&key) {
                debug!(target: "core::effects", key = %key, "hook already fired this turn");
                continue;
            }
        }

        match apply_effect(state, rng, &hook.name, hook.spec.effect) {
            Ok(()) => succeeded += 1,
            Err(error) => {
                warn!(
                    target: "core::effects",
                    owner = %hook.key,
                    trigger = %trigger,
                    error = %error,
                    "hook failed, continuing"
                );
                state.log(format!("{} {} failed: {}", hook.kind, hook.name, error));
            }
        }
    }

    succeeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BlessingRecord, CardKind, Effect, EquipmentRecord};
    use crate::state::Phase;
    use crate::test_support::{combat_run, fresh_run};

    fn blessing(id: &str, hooks: Vec<HookSpec>) -> BlessingRecord {
        BlessingRecord {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            rarity: None,
            once_per_turn: false,
            hooks,
        }
    }

    fn equipment(id: &str, slot_cost: u32, hooks: Vec<HookSpec>) -> EquipmentRecord {
        EquipmentRecord {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            rarity: None,
            once_per_turn: false,
            slot_cost,
            hooks,
        }
    }

    fn attack() -> CardRecord {
        let mut card = CardRecord::new("strike", "Strike", CardKind::Attack, 1);
        card.tags.push("attack".into());
        card
    }

    #[test]
    fn once_per_turn_gate_blocks_second_play() {
        let mut state = combat_run();
        state.player.energy = 0;
        state.blessings.push(blessing(
            "bl_energy_first",
            vec![HookSpec::new(Trigger::CardPlayed, Effect::GainEnergy(1)).once_per_turn()],
        ));
        let mut rng = GeneratorState::seed("gate");
        let card = attack();

        assert_eq!(fire(&mut state, &mut rng, HookEvent::CardPlayed(&card)), 1);
        assert_eq!(fire(&mut state, &mut rng, HookEvent::CardPlayed(&card)), 0);
        assert_eq!(state.player.energy, 1);
        assert!(state.turn_flags.has_fired("bl_energy_first:card_played#0"));

        state.turn_flags.reset();
        assert_eq!(fire(&mut state, &mut rng, HookEvent::CardPlayed(&card)), 1);
        assert_eq!(state.player.energy, 2);
    }

    #[test]
    fn tag_condition_filters_cards() {
        let mut state = combat_run();
        state.player.block = 0;
        state.blessings.push(blessing(
            "bl_attack_block",
            vec![HookSpec::new(Trigger::CardPlayed, Effect::GainBlock(2)).when_tag("attack")],
        ));
        let mut rng = GeneratorState::seed("tags");

        let skill = CardRecord::new("defend", "Defend", CardKind::Skill, 1);
        fire(&mut state, &mut rng, HookEvent::CardPlayed(&skill));
        assert_eq!(state.player.block, 0);

        fire(&mut state, &mut rng, HookEvent::CardPlayed(&attack()));
        assert_eq!(state.player.block, 2);
    }

    #[test]
    fn failing_hook_is_logged_and_others_still_run() {
        let mut state = fresh_run();
        state.phase = Phase::Map;
        state.blessings.push(blessing(
            "bl_broken",
            vec![HookSpec::new(Trigger::TurnStart, Effect::DamageEnemy(3))],
        ));
        state.blessings.push(blessing(
            "bl_start_block",
            vec![HookSpec::new(Trigger::TurnStart, Effect::GainBlock(3))],
        ));
        let mut rng = GeneratorState::seed("broken");

        assert_eq!(fire(&mut state, &mut rng, HookEvent::TurnStart), 1);
        assert_eq!(state.player.block, 3);
        assert!(
            state
                .log
                .iter()
                .any(|line| line.starts_with("Blessing bl_broken failed"))
        );
    }

    #[test]
    fn blessings_resolve_before_equipment() {
        let mut state = combat_run();
        state.player.block = 0;
        state.loadout.equipped.push(equipment(
            "regen_charm",
            1,
            vec![HookSpec::new(Trigger::TurnEnd, Effect::GainBlock(1))],
        ));
        state.blessings.push(blessing(
            "bl_end",
            vec![HookSpec::new(Trigger::TurnEnd, Effect::GainBlock(2))],
        ));
        let mut rng = GeneratorState::seed("order");
        let before = state.log.len();
        fire(&mut state, &mut rng, HookEvent::TurnEnd);
        let lines = &state.log[before..];
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("bl_end"));
        assert!(lines[1].starts_with("regen_charm"));
    }

    #[test]
    fn inert_equipment_does_not_fire() {
        let mut state = combat_run();
        state.player.block = 0;
        state.loadout.slots_max = 1;
        state.loadout.equipped.push(equipment("first", 1, vec![]));
        state.loadout.equipped.push(equipment(
            "start_shield",
            1,
            vec![HookSpec::new(Trigger::Equip, Effect::GainBlock(5))],
        ));
        let mut rng = GeneratorState::seed("inert");
        assert_eq!(fire(&mut state, &mut rng, HookEvent::Equip), 0);
        assert_eq!(state.player.block, 0);

        state.loadout.slots_max = 2;
        assert_eq!(fire(&mut state, &mut rng, HookEvent::Equip), 1);
        assert_eq!(state.player.block, 5);
    }

    #[test]
    fn equip_hooks_ignore_turn_gate() {
        let mut state = combat_run();
        state.player.block = 0;
        state.loadout.equipped.push(equipment(
            "start_shield",
            1,
            vec![HookSpec::new(Trigger::Equip, Effect::GainBlock(5)).once_per_turn()],
        ));
        let mut rng = GeneratorState::seed("equip");
        fire(&mut state, &mut rng, HookEvent::Equip);
        fire(&mut state, &mut rng, HookEvent::Equip);
        assert_eq!(state.player.block, 10);
    }
}
