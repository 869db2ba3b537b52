//! Convenient re-exports for downstream crates.

pub use crate::config::{DbConfig, DuplicatePolicy, EnricherConfig, LogLevel, MatchMode, StorageConfig};
pub use crate::error::{Error, Result};
pub use crate::key::{LookupKey, ObjectLocation};
pub use crate::types::{Column, RecordSet};
