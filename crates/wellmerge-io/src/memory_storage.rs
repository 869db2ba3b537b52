//! In-memory object storage for `memory://` and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use wellmerge_core::key::ObjectLocation;

use crate::error::{StorageError, StorageResult};
use crate::storage::ObjectStorage;

/// Thread-safe in-memory storage using a HashMap.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<HashMap<ObjectLocation, Vec<u8>>>>,
    fail_puts: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn data(&self) -> MutexGuard<'_, HashMap<ObjectLocation, Vec<u8>>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pre-populate an object (used by tests)
    pub fn insert(&self, location: ObjectLocation, bytes: impl Into<Vec<u8>>) {
        self.data().insert(location, bytes.into());
    }

    pub fn contains(&self, location: &ObjectLocation) -> bool {
        self.data().contains_key(location)
    }

    /// Copy of an object's bytes, if present.
    pub fn object(&self, location: &ObjectLocation) -> Option<Vec<u8>> {
        self.data().get(location).cloned()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Make every subsequent `put` fail with a backend error.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn get(&self, location: &ObjectLocation) -> StorageResult<Vec<u8>> {
        self.object(location)
            .ok_or_else(|| StorageError::NotFound(location.clone()))
    }

    async fn put(&self, location: &ObjectLocation, bytes: Vec<u8>) -> StorageResult<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(format!(
                "{location}: injected write failure"
            )));
        }
        self.data().insert(location.clone(), bytes);
        Ok(())
    }
}
