//! Core types for Lantern: world data, the alias index, flags, and the game state.
//!
//! World data is read once from JSON (or built programmatically) and seeds a
//! [`GameState`], the single mutable store every command reads and writes.
//! Nothing in this crate interprets player input; see `lt-engine` for that.

/// Phrase to canonical item id index.
pub mod alias;
/// Error types used throughout the crate.
pub mod error;
/// Flag state and scalar variable values.
pub mod flag;
/// Identifiers and directions.
pub mod id;
/// Item definitions and runtime item state.
pub mod item;
/// Scenes and their exits.
pub mod scene;
/// The mutable game state.
pub mod state;
/// Static world data and its validation.
pub mod world;

/// Re-export the alias index.
pub use alias::AliasIndex;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export flag types.
pub use flag::{FlagState, Scalar};
/// Re-export identifiers.
pub use id::{Direction, ItemId, SceneId};
/// Re-export item types.
pub use item::{Item, ItemKind, ItemState};
/// Re-export scene types.
pub use scene::{Exit, FlagPredicate, Lighting, Scene};
/// Re-export state types.
pub use state::{GameState, ItemLocation, SceneState};
/// Re-export world data types.
pub use world::{ScoringRules, WorldData};
