//! The world-state engine for Lantern.
//!
//! Turns a line of player input into a [`CommandResult`] by parsing it into a
//! [`Command`], resolving object phrases against the items in scope, and
//! applying the exit, container and scoring rules to the owned
//! [`lt_core::GameState`].

/// Configuration for a game engine.
pub mod config;
/// The openable/container state machine.
pub mod container;
/// Player-facing descriptions.
pub mod describe;
/// The command dispatcher.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// Exit evaluation.
pub mod exits;
/// Command parsing and entity resolution.
pub mod parser;
/// The uniform command result.
pub mod result;
/// One-time score awards.
pub mod scoring;

pub use config::EngineConfig;
pub use engine::GameEngine;
pub use error::{CommandError, EngineError, EngineResult};
pub use exits::{BlockReason, ExitDecision, evaluate_exit};
pub use parser::{Command, SystemCommand, parse_command};
pub use result::CommandResult;
pub use scoring::ScoreEvent;
