//! Command pipeline: pre_validate, apply, post_validate.

use crate::command::{Command, CommandTag};
use crate::config::MapMode;
use crate::env::ContentError;
use crate::state::{Phase, PhaseSet, RunState};

use super::errors::{HandlerError, InvariantViolation, Rejection};
use super::{Ctx, handlers};

pub(super) enum TransitionError {
    Rejected(Rejection),
    Content(ContentError),
    Invariant(InvariantViolation),
}

impl From<HandlerError> for TransitionError {
    fn from(error: HandlerError) -> Self {
        match error {
            HandlerError::Rejected(rejection) => Self::Rejected(rejection),
            HandlerError::Content(content) => Self::Content(content),
        }
    }
}

/// Runs one command through the three pipeline stages.
pub(super) fn drive(command: &Command, cx: &mut Ctx<'_, '_>) -> Result<(), TransitionError> {
    pre_validate(command.tag(), cx.state).map_err(TransitionError::Rejected)?;
    handlers::route(cx, command)?;
    post_validate(cx.state).map_err(TransitionError::Invariant)
}

/// Phases in which each command is meaningful.
///
/// `CompleteNode` is accepted wherever the close table has an entry.
pub(super) fn accepted_phases(tag: CommandTag) -> PhaseSet {
    use CommandTag::*;
    match tag {
        NewRun | OpenDeck | CloseDeck => PhaseSet::all(),
        ChooseStarterBlessing => PhaseSet::STARTER,
        StartCombat | PlayCard | EndTurn | QaKillEnemy | QaDraw | QaSetEnergy => PhaseSet::COMBAT,
        EnterNode | OpenPage | ChooseOffer | DismissOffer | Proceed | EquipItem | UnequipItem
        | QaOpenShop | QaOpenEvent => PhaseSet::MAP,
        TakeReward => PhaseSet::REWARD,
        TakeShop | ShopReroll | ShopRemoveBuy | ShopUpgradeBuy => PhaseSet::SHOP,
        DoBonfireHeal | DoWellUse | DoWellDismiss | EventChooseBlessing | EventRemoveCard
        | EventGambleRoll | EventTreasureOpen => PhaseSet::EVENT,
        ChooseLevelUp | SkipLevelUp => PhaseSet::LEVEL_UP,
        CompleteNode => handlers::closable_phases(),
        QaAddBlessingDemo | QaAddEquipmentDemo | QaPrintPage => PhaseSet::IN_RUN,
        QaInitPages => PhaseSet::STARTER | PhaseSet::MAP,
    }
}

/// Progression model a command needs, if any.
pub(super) fn required_mode(tag: CommandTag) -> Option<MapMode> {
    use CommandTag::*;
    match tag {
        EnterNode => Some(MapMode::Grid),
        OpenPage | ChooseOffer | DismissOffer | Proceed | QaPrintPage => Some(MapMode::Pages),
        _ => None,
    }
}

fn pre_validate(tag: CommandTag, state: &RunState) -> Result<(), Rejection> {
    let always = matches!(
        tag,
        CommandTag::NewRun | CommandTag::OpenDeck | CommandTag::CloseDeck
    );
    if state.run_complete && !always {
        return Err(Rejection::RunComplete);
    }
    if !state.phase.is_in(accepted_phases(tag)) {
        return Err(Rejection::WrongPhase {
            command: tag,
            phase: state.phase,
        });
    }
    if let Some(expected) = required_mode(tag) {
        if state.map_mode() != Some(expected) {
            return Err(Rejection::WrongMapMode {
                command: tag,
                expected,
            });
        }
    }
    Ok(())
}

fn post_validate(state: &RunState) -> Result<(), InvariantViolation> {
    let player = &state.player;
    if player.hp > player.max_hp {
        return Err(InvariantViolation::HpAboveMax {
            hp: player.hp,
            max_hp: player.max_hp,
        });
    }
    if state.phase != Phase::Menu && state.progression.is_none() {
        return Err(InvariantViolation::MissingProgression(state.phase));
    }
    if state.in_combat() {
        if state.enemy.is_none() {
            return Err(InvariantViolation::CombatWithoutEnemy);
        }
        if !state.piles.is_conserved() {
            return Err(InvariantViolation::PilesNotConserved {
                dealt: state.piles.dealt,
                held: state.piles.uids(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{combat_run, fresh_run};

    #[test]
    fn completed_runs_only_accept_new_run_and_deck_view() {
        let mut state = fresh_run();
        state.run_complete = true;
        state.phase = Phase::Victory;
        assert_eq!(
            pre_validate(CommandTag::CompleteNode, &state),
            Err(Rejection::RunComplete)
        );
        assert!(pre_validate(CommandTag::NewRun, &state).is_ok());
        assert!(pre_validate(CommandTag::OpenDeck, &state).is_ok());
    }

    #[test]
    fn defeat_accepts_nothing_but_new_run() {
        let mut state = fresh_run();
        state.phase = Phase::Defeat;
        assert!(matches!(
            pre_validate(CommandTag::EndTurn, &state),
            Err(Rejection::WrongPhase { .. })
        ));
        assert!(matches!(
            pre_validate(CommandTag::CompleteNode, &state),
            Err(Rejection::WrongPhase { .. })
        ));
        assert!(pre_validate(CommandTag::NewRun, &state).is_ok());
    }

    #[test]
    fn map_mode_is_checked_after_phase() {
        let state = fresh_run();
        assert_eq!(state.map_mode(), Some(MapMode::Grid));
        assert_eq!(
            pre_validate(CommandTag::OpenPage, &state),
            Err(Rejection::WrongMapMode {
                command: CommandTag::OpenPage,
                expected: MapMode::Pages,
            })
        );
        assert!(pre_validate(CommandTag::EnterNode, &state).is_ok());
    }

    #[test]
    fn post_validate_catches_lost_cards() {
        let mut state = combat_run();
        assert!(post_validate(&state).is_ok());
        state.piles.hand.pop();
        assert!(matches!(
            post_validate(&state),
            Err(InvariantViolation::PilesNotConserved { .. })
        ));
    }

    #[test]
    fn post_validate_catches_overheal() {
        let mut state = fresh_run();
        state.player.hp = state.player.max_hp + 1;
        assert!(matches!(
            post_validate(&state),
            Err(InvariantViolation::HpAboveMax { .. })
        ));
    }
}
