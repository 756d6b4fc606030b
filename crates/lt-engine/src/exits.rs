//! Exit evaluation: may the player leave the current scene in a direction?

use lt_core::{CoreResult, Direction, Exit, GameState, SceneId};

use crate::error::CommandError;

/// Outcome of evaluating one exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitDecision {
    /// Passage allowed to the given scene.
    Allowed(SceneId),
    /// Passage refused.
    Blocked(BlockReason),
}

/// Why an exit refused passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// No exit leads that way.
    NoExit(Direction),
    /// The exit exists but refused, with its own message.
    Refused(String),
}

impl From<BlockReason> for CommandError {
    fn from(reason: BlockReason) -> Self {
        match reason {
            BlockReason::NoExit(direction) => CommandError::NoExit(direction),
            BlockReason::Refused(message) => CommandError::Blocked(message),
        }
    }
}

/// Decide whether the player may leave the current scene toward `direction`.
///
/// Pure: reads flags, mutates nothing, and keeps no memory between calls.
/// A conditional exit whose flag is unset always refuses.
pub fn evaluate_exit(state: &GameState, direction: Direction) -> CoreResult<ExitDecision> {
    let scene = state.current_scene()?;
    let decision = match scene.exits.get(&direction) {
        None => ExitDecision::Blocked(BlockReason::NoExit(direction)),
        Some(Exit::Simple(to)) => ExitDecision::Allowed(to.clone()),
        Some(Exit::Conditional {
            to,
            predicate,
            failure_message,
        }) => {
            if predicate.holds(state.flag_state(&predicate.flag)) {
                ExitDecision::Allowed(to.clone())
            } else {
                ExitDecision::Blocked(BlockReason::Refused(failure_message.clone()))
            }
        }
        Some(Exit::Blocked { failure_message }) => {
            ExitDecision::Blocked(BlockReason::Refused(failure_message.clone()))
        }
    };
    tracing::trace!(scene = %scene.id, %direction, ?decision, "evaluated exit");
    Ok(decision)
}
