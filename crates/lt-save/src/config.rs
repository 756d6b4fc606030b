//! Configuration for saving and restoring.

use std::path::PathBuf;

/// Format version written into new save envelopes.
pub const FORMAT_VERSION: &str = "1.0";

/// Configuration for a [`crate::SaveManager`].
#[derive(Debug, Clone)]
pub struct SaveConfig {
    /// Key the save is stored under.
    pub key: String,
    /// Directory for file storage. `None` keeps saves in memory only.
    pub dir: Option<PathBuf>,
    /// Version string written into new envelopes.
    pub version: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            key: "lantern-save".to_string(),
            dir: None,
            version: FORMAT_VERSION.to_string(),
        }
    }
}

impl SaveConfig {
    /// Set the storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Store saves as files in `dir`.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Set the version written into new envelopes.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}
