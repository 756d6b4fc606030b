//! Error types for persistence.

use thiserror::Error;

/// Result type for storage backends.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for save and restore.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend's lock was poisoned by a panicking writer.
    #[error("storage lock was poisoned")]
    LockPoisoned,

    /// The underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be stored by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend is not usable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Reasons a saved payload is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload is empty or `null`.
    #[error("save payload is empty")]
    Empty,

    /// The payload is not valid JSON or does not match the state shape.
    #[error("save payload is malformed: {0}")]
    Malformed(String),

    /// A required field is absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A field has the wrong JSON type.
    #[error("field `{field}` should be {expected}")]
    WrongType {
        /// Dotted path of the field.
        field: String,
        /// The JSON type that was expected.
        expected: &'static str,
    },

    /// The current scene is not among the saved scenes.
    #[error("current scene \"{0}\" is not in the saved scenes")]
    UnknownScene(String),

    /// A placement refers to an item that is not among the saved items.
    #[error("{location} refers to unknown item \"{item}\"")]
    UnknownItem {
        /// The missing item id.
        item: String,
        /// Where the reference was found.
        location: String,
    },

    /// An item is placed in more than one location.
    #[error("item \"{item}\" is placed in both {first} and {second}")]
    DuplicatePlacement {
        /// The item placed twice.
        item: String,
        /// The first location found.
        first: String,
        /// The conflicting location.
        second: String,
    },

    /// An item is inside itself, directly or through other containers.
    #[error("item \"{0}\" is inside itself")]
    ContainmentCycle(String),
}

/// Errors that can occur while saving or restoring.
#[derive(Debug, Error)]
pub enum SaveError {
    /// No save exists under the configured key.
    #[error("no saved game found")]
    NoSave,

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The saved payload was rejected.
    #[error("invalid save: {0}")]
    Validation(#[from] ValidationError),

    /// The state could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
