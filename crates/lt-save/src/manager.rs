//! Save and restore of a whole game state.

use lt_core::GameState;

use crate::backend::{FileStorage, StorageBackend};
use crate::config::SaveConfig;
use crate::envelope::SaveEnvelope;
use crate::error::{SaveError, SaveResult};
use crate::fallback::FallbackStorage;
use crate::validate::validate_payload;

/// Open the storage described by `config`.
///
/// A configured directory becomes file storage; if it cannot be created or
/// fails its probe, saves are kept in memory for the session.
pub fn open_storage(config: &SaveConfig) -> FallbackStorage {
    let primary = config.dir.as_ref().and_then(|dir| match FileStorage::new(dir) {
        Ok(storage) => Some(Box::new(storage) as Box<dyn StorageBackend>),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot open save directory");
            None
        }
    });
    FallbackStorage::probe(primary)
}

/// Writes and reads one save slot.
///
/// The `bool` methods never fail loudly: errors are logged and reported as
/// `false`, and the live state is never partially overwritten.
#[derive(Debug)]
pub struct SaveManager {
    storage: FallbackStorage,
    config: SaveConfig,
}

impl SaveManager {
    /// Create a manager using the storage described by `config`.
    pub fn new(config: SaveConfig) -> Self {
        Self {
            storage: open_storage(&config),
            config,
        }
    }

    /// Create a manager over an explicit backend, probed like any other.
    pub fn with_storage(config: SaveConfig, backend: Box<dyn StorageBackend>) -> Self {
        Self {
            storage: FallbackStorage::probe(Some(backend)),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Name of the backend currently in use.
    pub fn storage_name(&self) -> &'static str {
        self.storage.name()
    }

    /// Save a snapshot of `state`.
    pub fn try_save(&self, state: &GameState) -> SaveResult<()> {
        let envelope = SaveEnvelope::new(self.config.version.clone(), state);
        let json = envelope.to_json()?;
        self.storage.set(&self.config.key, &json)?;
        tracing::info!(
            key = %self.config.key,
            backend = self.storage.name(),
            moves = state.moves,
            "game saved"
        );
        Ok(())
    }

    /// Save a snapshot of `state`. Returns whether it was written.
    pub fn save(&self, state: &GameState) -> bool {
        match self.try_save(state) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                false
            }
        }
    }

    /// Read and validate the saved state.
    pub fn load(&self) -> SaveResult<GameState> {
        let payload = self.storage.get(&self.config.key)?.ok_or(SaveError::NoSave)?;
        let envelope = validate_payload(&payload)?;
        tracing::info!(
            key = %self.config.key,
            version = envelope.version.as_deref().unwrap_or("none"),
            "game loaded"
        );
        Ok(envelope.game_state)
    }

    /// Replace `state` with the saved state.
    ///
    /// On any failure `state` is left exactly as it was.
    pub fn restore(&self, state: &mut GameState) -> bool {
        match self.load() {
            Ok(loaded) => {
                *state = loaded;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "restore failed");
                false
            }
        }
    }

    /// Whether a save exists under the configured key.
    pub fn has_save(&self) -> bool {
        matches!(self.storage.get(&self.config.key), Ok(Some(_)))
    }

    /// Delete the save. Returns whether one was removed.
    pub fn delete_save(&self) -> bool {
        match self.storage.remove(&self.config.key) {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!(error = %e, "delete failed");
                false
            }
        }
    }
}

impl Default for SaveManager {
    fn default() -> Self {
        Self::new(SaveConfig::default())
    }
}
