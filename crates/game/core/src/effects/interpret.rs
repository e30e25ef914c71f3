//! Fixed interpreter for the [`Effect`] vocabulary.

use crate::env::{Effect, GeneratorState};
use crate::error::{ErrorSeverity, GameError};
use crate::state::RunState;

/// Failure of a single hook invocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HookError {
    #[error("no enemy to damage")]
    NoEnemy,

    #[error("{0} is only possible during combat")]
    NotInCombat(Effect),
}

impl GameError for HookError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEnemy => "HOOK_NO_ENEMY",
            Self::NotInCombat(_) => "HOOK_NOT_IN_COMBAT",
        }
    }
}

/// Applies one effect on behalf of `source` and logs what it did.
pub fn apply_effect(
    state: &mut RunState,
    rng: &mut GeneratorState,
    source: &str,
    effect: Effect,
) -> Result<(), HookError> {
    match effect {
        Effect::GainBlock(amount) => {
            state.player.block = state.player.block.saturating_add(amount);
            state.log(format!("{source}: +{amount} block"));
        }
        Effect::GainEnergy(amount) => {
            state.player.energy = state.player.energy.saturating_add(amount);
            state.log(format!("{source}: +{amount} energy"));
        }
        Effect::Heal(amount) => {
            let healed = state.player.heal(amount);
            state.log(format!("{source}: healed +{healed}"));
        }
        Effect::GainGold(amount) => {
            state.player.gold = state.player.gold.saturating_add(amount);
            state.log(format!("{source}: +{amount} gold"));
        }
        Effect::DamageEnemy(amount) => {
            let enemy = state.enemy.as_mut().ok_or(HookError::NoEnemy)?;
            let left = enemy.take_damage(amount);
            state.log(format!("{source}: dealt {amount} damage ({left} hp left)"));
        }
        Effect::Draw(count) => {
            if !state.in_combat() {
                return Err(HookError::NotInCombat(effect));
            }
            let drawn = state.piles.draw_n(count as usize, rng);
            state.log(format!("{source}: drew {drawn}"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{combat_run, fresh_run};

    #[test]
    fn heal_is_capped() {
        let mut state = fresh_run();
        state.player.hp = state.player.max_hp - 1;
        let mut rng = GeneratorState::seed("heal");
        apply_effect(&mut state, &mut rng, "regen", Effect::Heal(5)).unwrap();
        assert_eq!(state.player.hp, state.player.max_hp);
        assert_eq!(state.last_log(), Some("regen: healed +1"));
    }

    #[test]
    fn damage_requires_an_enemy() {
        let mut state = fresh_run();
        let mut rng = GeneratorState::seed("none");
        assert_eq!(
            apply_effect(&mut state, &mut rng, "x", Effect::DamageEnemy(1)),
            Err(HookError::NoEnemy)
        );
    }

    #[test]
    fn draw_only_in_combat() {
        let mut state = fresh_run();
        let mut rng = GeneratorState::seed("draw");
        assert!(matches!(
            apply_effect(&mut state, &mut rng, "x", Effect::Draw(1)),
            Err(HookError::NotInCombat(_))
        ));

        let mut state = combat_run();
        let before = state.piles.hand.len();
        apply_effect(&mut state, &mut rng, "x", Effect::Draw(1)).unwrap();
        assert_eq!(state.piles.hand.len(), before + 1);
    }
}
