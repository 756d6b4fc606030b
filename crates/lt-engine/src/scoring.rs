//! One-time score awards.

use std::fmt;

use lt_core::{GameState, ItemId, SceneId, ScoringRules};

/// Prefix of the flags that record awarded events.
pub const SCORED_FLAG_PREFIX: &str = "scored:";

/// Something that may be worth points, once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreEvent {
    /// The player entered a scene for the first time.
    Visit(SceneId),
    /// A treasure was put into the deposit receptacle.
    Deposit(ItemId),
}

impl ScoreEvent {
    /// The flag recording that this event has been awarded.
    pub fn flag(&self) -> String {
        format!("{SCORED_FLAG_PREFIX}{self}")
    }

    fn value(&self, rules: &ScoringRules) -> Option<u32> {
        match self {
            Self::Visit(scene) => rules.visit_value(scene),
            Self::Deposit(item) => rules.deposit_value(item),
        }
    }
}

impl fmt::Display for ScoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visit(scene) => write!(f, "visit:{scene}"),
            Self::Deposit(item) => write!(f, "deposit:{item}"),
        }
    }
}

/// Award `event` if it is worth points and has not been awarded before.
///
/// Returns the points added, or `None` when nothing changed.
pub fn award(state: &mut GameState, rules: &ScoringRules, event: &ScoreEvent) -> Option<u32> {
    let flag = event.flag();
    if state.get_flag(&flag) == Some(true) {
        return None;
    }
    let points = event.value(rules)?;
    state.set_flag(flag, true);
    state.add_score(points);
    tracing::debug!(%event, points, score = state.score, "awarded points");
    Some(points)
}
