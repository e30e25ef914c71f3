//! Command dispatch for the run state machine.
//!
//! [`GameEngine::apply`] is the only way a [`RunState`] changes. Every command
//! runs through the same pipeline: pre_validate (terminal and phase guards),
//! apply (the command handler), post_validate (engine invariants). Rejected
//! commands are folded back into an unchanged state plus one log line, so the
//! caller only ever sees an error for corrupt content or an engine bug.
mod errors;
mod handlers;
mod transition;

pub use errors::{EngineError, InvariantViolation, Rejection};

use tracing::{debug, error};

use crate::command::Command;
use crate::env::{GameEnv, GeneratorState};
use crate::error::GameError;
use crate::state::RunState;

use transition::TransitionError;

/// Mutable view over one command's working copy.
pub(crate) struct Ctx<'s, 'e> {
    pub state: &'s mut RunState,
    pub rng: &'s mut GeneratorState,
    pub env: GameEnv<'e>,
}

/// Pure reducer over `(RunState, Command, GeneratorState)`.
///
/// The engine holds no state of its own; the content tables and balance
/// config are injected once through [`GameEnv`].
#[derive(Clone, Copy, Debug)]
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    /// Applies `command` to a copy of `state` and returns the new state and generator.
    ///
    /// The input state is never touched. On rejection the returned state equals
    /// the input with one extra log line and the generator is handed back as-is.
    pub fn apply(
        &self,
        state: &RunState,
        command: &Command,
        rng: GeneratorState,
    ) -> Result<(RunState, GeneratorState), EngineError> {
        let tag = command.tag();
        debug!(
            target: "core::engine",
            command = %tag,
            phase = %state.phase,
            "applying command"
        );

        let mut next = state.clone();
        let mut next_rng = rng;
        let mut cx = Ctx {
            state: &mut next,
            rng: &mut next_rng,
            env: self.env,
        };

        match transition::drive(command, &mut cx) {
            Ok(()) => Ok((next, next_rng)),
            Err(TransitionError::Rejected(rejection)) => {
                debug!(
                    target: "core::engine",
                    command = %tag,
                    code = rejection.error_code(),
                    reason = %rejection,
                    "command rejected"
                );
                let mut unchanged = state.clone();
                unchanged.log(rejection.to_string());
                Ok((unchanged, rng))
            }
            Err(TransitionError::Content(content)) => {
                error!(
                    target: "core::engine",
                    command = %tag,
                    code = content.error_code(),
                    error = %content,
                    "content lookup failed"
                );
                Err(EngineError::Content {
                    command: tag,
                    error: content,
                })
            }
            Err(TransitionError::Invariant(violation)) => {
                error!(
                    target: "core::engine",
                    command = %tag,
                    violation = %violation,
                    "invariant violated"
                );
                Err(EngineError::Invariant {
                    command: tag,
                    violation,
                })
            }
        }
    }

    /// Applies a sequence of commands, threading state and generator through each.
    pub fn apply_all<'c>(
        &self,
        state: &RunState,
        commands: impl IntoIterator<Item = &'c Command>,
        rng: GeneratorState,
    ) -> Result<(RunState, GeneratorState), EngineError> {
        let mut current = (state.clone(), rng);
        for command in commands {
            current = self.apply(&current.0, command, current.1)?;
        }
        Ok(current)
    }
}

/// Free-function form of [`GameEngine::apply`].
pub fn apply(
    env: GameEnv<'_>,
    state: &RunState,
    command: &Command,
    rng: GeneratorState,
) -> Result<(RunState, GeneratorState), EngineError> {
    GameEngine::new(env).apply(state, command, rng)
}
