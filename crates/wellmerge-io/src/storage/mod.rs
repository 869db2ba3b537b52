//! Object storage adapters.
//!
//! - `fs`: buckets as sub-directories of a local root.
//! - `cloud`: Amazon S3 built on top of `object_store` (feature `s3`).
//! - `MemoryStorage` (crate root): in-process map, used by tests and `memory://`.
//!
//! `build_storage_from_config` picks the backend from the configured URI
//! (e.g. `s3://`, `file:///tmp/buckets`, `memory://`).

mod fs;
pub use fs::FsStorage;

#[cfg(feature = "s3")]
mod cloud;
#[cfg(feature = "s3")]
pub use cloud::S3Storage;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use wellmerge_core::config::StorageConfig;
use wellmerge_core::key::ObjectLocation;

use crate::error::{StorageError, StorageResult};
use crate::memory_storage::MemoryStorage;

/// Whole-object reads and writes addressed by bucket and key.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Fetch the full content of an object.
    async fn get(&self, location: &ObjectLocation) -> StorageResult<Vec<u8>>;

    /// Write an object, replacing any existing content at that key.
    async fn put(&self, location: &ObjectLocation, bytes: Vec<u8>) -> StorageResult<()>;
}

/// Retry/backoff configuration for cloud adapters.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl From<&StorageConfig> for RetryConfig {
    fn from(cfg: &StorageConfig) -> Self {
        Self {
            max_retries: cfg.retry_max_retries,
            initial_backoff: Duration::from_millis(cfg.retry_initial_backoff_ms),
            max_backoff: Duration::from_millis(cfg.retry_max_backoff_ms),
        }
    }
}

/// Build the storage backend named by the configured URI.
pub fn build_storage_from_config(cfg: &StorageConfig) -> StorageResult<Arc<dyn ObjectStorage>> {
    match cfg.scheme() {
        Some("s3") => {
            #[cfg(feature = "s3")]
            {
                Ok(Arc::new(S3Storage::new(cfg)?))
            }

            #[cfg(not(feature = "s3"))]
            {
                Err(StorageError::Config(
                    "wellmerge was built without the `s3` feature; rebuild with `--features wellmerge-io/s3`"
                        .into(),
                ))
            }
        }
        Some("file") => Ok(Arc::new(FsStorage::from_uri(&cfg.uri)?)),
        Some("memory") => Ok(Arc::new(MemoryStorage::new())),
        Some(other) => Err(StorageError::Config(format!(
            "unsupported storage scheme '{other}'"
        ))),
        None => Err(StorageError::Config("STORAGE_URI is empty".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(uri: &str) -> StorageConfig {
        StorageConfig {
            uri: uri.to_string(),
            ..StorageConfig::default()
        }
    }

    #[test]
    fn test_memory_scheme_builds() {
        assert!(build_storage_from_config(&cfg("memory://")).is_ok());
    }

    #[test]
    fn test_invalid_scheme_errors() {
        let err = build_storage_from_config(&cfg("ftp://example.com/in"))
            .err()
            .expect("should fail");
        assert!(err.to_string().contains("unsupported storage scheme"));
    }

    #[cfg(not(feature = "s3"))]
    #[test]
    fn test_s3_without_feature_fails() {
        let err = build_storage_from_config(&cfg("s3://"))
            .err()
            .expect("feature missing");
        assert!(err.to_string().contains("without the `s3` feature"));
    }

    #[test]
    fn test_retry_config_from_storage_config() {
        let retry = RetryConfig::from(&cfg("s3://"));
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.initial_backoff, Duration::from_millis(200));
        assert_eq!(retry.max_backoff, Duration::from_secs(5));
    }
}
