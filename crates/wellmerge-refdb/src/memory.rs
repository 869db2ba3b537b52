//! In-process reference store. Rows come back in insertion order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use wellmerge_core::config::MatchMode;
use wellmerge_core::error::{Error, Result};
use wellmerge_core::key::LookupKey;

use crate::pattern::name_matches;
use crate::record::ReferenceRecord;
use crate::ReferenceStore;

#[derive(Clone, Default)]
pub struct MemoryReferenceStore {
    rows: Arc<Mutex<Vec<ReferenceRecord>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = ReferenceRecord>) -> Self {
        let store = Self::new();
        for r in records {
            store.insert(r);
        }
        store
    }

    pub fn insert(&self, record: ReferenceRecord) {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Simulate an unreachable database.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReferenceStore for MemoryReferenceStore {
    async fn well_names(&self, key: &LookupKey, mode: MatchMode) -> Result<Vec<String>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Connection("memory reference store is unavailable".into()));
        }
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(rows
            .iter()
            .filter(|r| {
                r.job_date == key.job_date
                    && name_matches(mode, &r.client_name, &key.client_name)
                    && name_matches(mode, &r.rig_name, &key.rig_name)
            })
            .map(|r| r.well_name.clone().unwrap_or_default())
            .collect())
    }
}
