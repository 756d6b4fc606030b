//! The versioned wrapper around a saved game state.

use chrono::{DateTime, TimeZone, Utc};
use lt_core::GameState;
use serde::{Deserialize, Serialize};

/// A saved game: format version, save time, and the full state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEnvelope {
    /// Save format version. Older saves may lack one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
    /// Snapshot of the game.
    pub game_state: GameState,
}

impl SaveEnvelope {
    /// Wrap a copy of `state`, stamped with the current time.
    pub fn new(version: impl Into<String>, state: &GameState) -> Self {
        Self {
            version: Some(version.into()),
            timestamp: Utc::now().timestamp_millis(),
            game_state: state.clone(),
        }
    }

    /// When the save was written, if the timestamp is in range.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
