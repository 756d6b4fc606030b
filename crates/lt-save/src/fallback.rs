//! Backend selection with a permanent in-memory fallback.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::backend::{MemoryStorage, StorageBackend};
use crate::error::StorageResult;

const PROBE_KEY: &str = "lantern-probe";

/// A persistent backend that degrades to memory on its first failure.
///
/// The primary backend is probed once at construction. After any failure,
/// probe or later, every call for the rest of the session goes to the
/// in-memory store; the failing call itself is retried there.
pub struct FallbackStorage {
    primary: Option<Box<dyn StorageBackend>>,
    memory: MemoryStorage,
    degraded: AtomicBool,
}

impl FallbackStorage {
    /// Probe `primary` and fall back to memory if it is absent or fails.
    pub fn probe(primary: Option<Box<dyn StorageBackend>>) -> Self {
        let storage = Self {
            primary,
            memory: MemoryStorage::new(),
            degraded: AtomicBool::new(false),
        };
        match &storage.primary {
            None => {
                tracing::debug!("no persistent storage configured, using memory");
                storage.degrade();
            }
            Some(backend) => {
                if let Err(e) = probe_backend(backend.as_ref()) {
                    tracing::warn!(
                        backend = backend.name(),
                        error = %e,
                        "storage probe failed, falling back to memory"
                    );
                    storage.degrade();
                }
            }
        }
        storage
    }

    /// Memory-only storage.
    pub fn memory() -> Self {
        Self::probe(None)
    }

    /// Whether calls currently go to the in-memory store.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    fn degrade(&self) {
        self.degraded.store(true, Ordering::Relaxed);
    }

    fn active(&self) -> Option<&dyn StorageBackend> {
        if self.is_degraded() {
            return None;
        }
        self.primary.as_deref()
    }

    // Run `op` on the primary; on failure switch to memory for good and retry there.
    fn with_fallback<T>(
        &self,
        op_name: &str,
        op: impl Fn(&dyn StorageBackend) -> StorageResult<T>,
    ) -> StorageResult<T> {
        if let Some(primary) = self.active() {
            match op(primary) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(
                        backend = primary.name(),
                        op = op_name,
                        error = %e,
                        "storage failed, falling back to memory for this session"
                    );
                    self.degrade();
                }
            }
        }
        op(&self.memory)
    }
}

fn probe_backend(backend: &dyn StorageBackend) -> StorageResult<()> {
    backend.set(PROBE_KEY, "probe")?;
    backend.get(PROBE_KEY)?;
    backend.remove(PROBE_KEY)?;
    Ok(())
}

impl StorageBackend for FallbackStorage {
    fn name(&self) -> &'static str {
        match self.active() {
            Some(primary) => primary.name(),
            None => self.memory.name(),
        }
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.with_fallback("get", |backend| backend.get(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.with_fallback("set", |backend| backend.set(key, value))
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        self.with_fallback("remove", |backend| backend.remove(key))
    }
}

impl std::fmt::Debug for FallbackStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackStorage")
            .field("primary", &self.primary.as_ref().map(|p| p.name()))
            .field("degraded", &self.is_degraded())
            .finish()
    }
}
