//! Error types for the engine.
//!
//! [`EngineError`] covers setting an engine up. [`CommandError`] is the
//! failure side of a single command; its `Display` text is exactly what the
//! player is shown.

use lt_core::{CoreError, Direction, SceneId};
use thiserror::Error;

/// Result type for engine setup.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while creating or reseeding an engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configured start scene does not exist.
    #[error("start scene not found: {0}")]
    StartSceneNotFound(SceneId),

    /// Invalid world data or state.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Why a command failed.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Nothing was typed.
    #[error("I beg your pardon?")]
    Empty,

    /// The verb is not recognized.
    #[error("I don't understand that.")]
    NotUnderstood,

    /// A verb that needs an object was given none.
    #[error("{0}")]
    Incomplete(String),

    /// A front-end command reached the dispatcher.
    #[error("You can't {0} from inside the game.")]
    SystemCommand(&'static str),

    /// The phrase names nothing in scope.
    #[error("You don't see any {0} here.")]
    NotHere(String),

    /// No exit leads that way.
    #[error("You can't go {0} from here.")]
    NoExit(Direction),

    /// An exit refused passage.
    #[error("{0}")]
    Blocked(String),

    /// The item is already carried.
    #[error("You already have the {0}.")]
    AlreadyCarried(String),

    /// The item is not carried.
    #[error("You don't have the {0}.")]
    NotCarried(String),

    /// The item cannot be picked up.
    #[error("You can't take the {0}.")]
    NotPortable(String),

    /// The item has no open state.
    #[error("You can't open the {0}.")]
    NotOpenable(String),

    /// The item has no open state.
    #[error("You can't close the {0}.")]
    NotClosable(String),

    /// Opening an open item.
    #[error("The {0} is already open.")]
    AlreadyOpen(String),

    /// Closing a closed item.
    #[error("The {0} is already closed.")]
    AlreadyClosed(String),

    /// The container is closed.
    #[error("The {0} is closed.")]
    Closed(String),

    /// The item is locked.
    #[error("The {0} is locked.")]
    Locked(String),

    /// The item cannot hold anything.
    #[error("You can't put anything in the {0}.")]
    NotContainer(String),

    /// The item cannot be looked into.
    #[error("You can't look inside the {0}.")]
    NoInside(String),

    /// Putting an item inside itself or its own contents.
    #[error("You can't put the {0} inside itself.")]
    IntoItself(String),

    /// The item is larger than the container's capacity.
    #[error("The {item} won't fit in the {container}.")]
    WontFit {
        /// The item being put.
        item: String,
        /// The container that is too small.
        container: String,
    },

    /// The item has no lock.
    #[error("You can't lock or unlock the {0}.")]
    NotLockable(String),

    /// Unlocking an unlocked item.
    #[error("The {0} isn't locked.")]
    NotLocked(String),

    /// Locking a locked item.
    #[error("The {0} is already locked.")]
    AlreadyLocked(String),

    /// Locking an open item.
    #[error("You'll have to close the {0} first.")]
    MustClose(String),

    /// The key does not belong to the lock.
    #[error("The {key} doesn't fit the {target}.")]
    WrongKey {
        /// The key tried.
        key: String,
        /// The item it was tried on.
        target: String,
    },

    /// The game state is inconsistent.
    #[error("Something is wrong with the world: {0}")]
    State(#[from] CoreError),
}
