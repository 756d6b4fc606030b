use crate::id::{ItemId, SceneId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading world data or manipulating game state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested scene ID does not exist.
    #[error("scene not found: {0}")]
    SceneNotFound(SceneId),

    /// The requested item ID does not exist.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// An item is placed in more than one location by the world data.
    #[error("item \"{item}\" is placed in both {first} and {second}")]
    DuplicatePlacement {
        /// The item placed twice.
        item: ItemId,
        /// The first location the item was found in.
        first: String,
        /// The conflicting second location.
        second: String,
    },

    /// An item ends up inside itself, directly or through other containers.
    #[error("item \"{0}\" is inside itself")]
    ContainmentCycle(ItemId),

    /// A flag was given a value that is not a boolean.
    #[error("flag \"{name}\" must be a boolean, got {value}")]
    FlagType {
        /// The flag name.
        name: String,
        /// The rejected value, rendered as JSON.
        value: String,
    },

    /// The world data could not be parsed.
    #[error("invalid world data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
