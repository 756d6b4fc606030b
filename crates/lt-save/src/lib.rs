//! Save and restore for Lantern games.
//!
//! A [`SaveManager`] wraps a [`GameState`](lt_core::GameState) in a versioned
//! [`SaveEnvelope`] and writes it through a [`StorageBackend`]. Persistent
//! storage that is missing or failing is replaced by an in-memory store for
//! the rest of the session. Payloads are validated before they replace any
//! live state.

/// Storage backends.
pub mod backend;
/// Save configuration.
pub mod config;
/// Save envelope.
pub mod envelope;
/// Error types.
pub mod error;
/// In-memory fallback over a persistent backend.
pub mod fallback;
/// The save manager.
pub mod manager;
/// Payload validation.
pub mod validate;

/// Re-export storage backends.
pub use backend::{FileStorage, MemoryStorage, StorageBackend};
/// Re-export configuration.
pub use config::{FORMAT_VERSION, SaveConfig};
/// Re-export the envelope.
pub use envelope::SaveEnvelope;
/// Re-export error types.
pub use error::{SaveError, SaveResult, StorageError, StorageResult, ValidationError};
/// Re-export the fallback wrapper.
pub use fallback::FallbackStorage;
/// Re-export the manager.
pub use manager::{SaveManager, open_storage};
/// Re-export validation.
pub use validate::validate_payload;
