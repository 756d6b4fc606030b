//! The uniform result of a dispatched command.

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// What the player sees after one command, plus its bookkeeping effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    /// Whether the command did what was asked.
    pub success: bool,
    /// Text for the player.
    pub message: String,
    /// Whether the command advanced the move counter.
    pub counts_as_move: bool,
    /// Points gained, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_change: Option<u32>,
}

impl CommandResult {
    /// A successful result.
    pub fn ok(message: impl Into<String>, counts_as_move: bool) -> Self {
        Self {
            success: true,
            message: message.into(),
            counts_as_move,
            score_change: None,
        }
    }

    /// A failed result carrying the error's message.
    pub fn failed(error: &CommandError, counts_as_move: bool) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            counts_as_move,
            score_change: None,
        }
    }

    /// Attach a score change.
    pub fn with_score_change(mut self, points: Option<u32>) -> Self {
        self.score_change = points;
        self
    }
}
