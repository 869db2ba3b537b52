#![forbid(unsafe_code)]
//! wellmerge-refdb: the reference store that maps (client, rig, date) to a well.
//!
//! The store is external and read-only. `ReferenceStore` returns every
//! candidate well name in the order the store produced them; choosing one is
//! left to the caller.

pub mod memory;
pub mod pattern;
pub mod record;

#[cfg(feature = "mysql")]
pub mod mysql;

use async_trait::async_trait;
use wellmerge_core::config::MatchMode;
use wellmerge_core::error::Result;
use wellmerge_core::key::LookupKey;

pub use memory::MemoryReferenceStore;
pub use record::ReferenceRecord;

#[cfg(feature = "mysql")]
pub use mysql::MySqlReferenceStore;

#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Well names of all rows matching `key`, in store order.
    ///
    /// `client_name` and `rig_name` are compared using `mode`; `job_date`
    /// always matches exactly. A NULL well name comes back as an empty string.
    async fn well_names(&self, key: &LookupKey, mode: MatchMode) -> Result<Vec<String>>;
}
