#![forbid(unsafe_code)]
//! wellmerge-io: object storage adapters and CSV codec.
//!
//! `storage` exposes the async `ObjectStorage` trait with filesystem, memory and
//! (feature `s3`) S3 backends. `readers`/`writers` convert between CSV bytes and
//! `RecordSet`.

pub mod error;
pub mod memory_storage;
pub mod readers;
pub mod storage;
pub mod writers;

pub use error::{StorageError, StorageResult};
pub use memory_storage::MemoryStorage;
pub use readers::csv::read_csv;
pub use storage::{build_storage_from_config, FsStorage, ObjectStorage};
pub use writers::csv::write_csv;
