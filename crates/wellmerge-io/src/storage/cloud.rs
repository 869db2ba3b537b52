use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::{BackoffConfig, Error as ObjectStoreError, ObjectStore};
use wellmerge_core::config::StorageConfig;
use wellmerge_core::key::ObjectLocation;

use super::{ObjectStorage, RetryConfig};
use crate::error::{StorageError, StorageResult};

/// Amazon S3 storage. Buckets come from trigger events, so one client is
/// built lazily per bucket and cached for the life of the process.
pub struct S3Storage {
    region: Option<String>,
    retry: RetryConfig,
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl S3Storage {
    pub fn new(cfg: &StorageConfig) -> StorageResult<Self> {
        Ok(Self {
            region: cfg.aws_region.clone(),
            retry: RetryConfig::from(cfg),
            stores: Mutex::new(HashMap::new()),
        })
    }

    fn store_for(&self, bucket: &str) -> StorageResult<Arc<dyn ObjectStore>> {
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = stores.get(bucket) {
            return Ok(Arc::clone(store));
        }

        // Credentials and default region come from the Lambda environment.
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
        if let Some(region) = &self.region {
            builder = builder.with_region(region.clone());
        }
        builder = builder.with_retry(object_store_retry(&self.retry));
        let store: Arc<dyn ObjectStore> = Arc::new(
            builder
                .build()
                .map_err(|e| StorageError::Config(format!("s3 client for '{bucket}': {e}")))?,
        );
        tracing::debug!(bucket, "built s3 client");
        stores.insert(bucket.to_string(), Arc::clone(&store));
        Ok(store)
    }
}

fn object_store_retry(retry: &RetryConfig) -> object_store::RetryConfig {
    object_store::RetryConfig {
        max_retries: retry.max_retries,
        retry_timeout: retry.max_backoff * (retry.max_retries as u32 + 1),
        backoff: BackoffConfig {
            init_backoff: retry.initial_backoff,
            max_backoff: retry.max_backoff,
            base: 2.0,
        },
    }
}

fn map_err(location: &ObjectLocation, err: ObjectStoreError) -> StorageError {
    match err {
        ObjectStoreError::NotFound { .. } => StorageError::NotFound(location.clone()),
        other => StorageError::Backend(format!("{location}: {other}")),
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn get(&self, location: &ObjectLocation) -> StorageResult<Vec<u8>> {
        let store = self.store_for(&location.bucket)?;
        let path = ObjectPath::from(location.key.as_str());
        let result = store
            .get(&path)
            .await
            .map_err(|e| map_err(location, e))?;
        let bytes = result.bytes().await.map_err(|e| map_err(location, e))?;
        Ok(bytes.to_vec())
    }

    async fn put(&self, location: &ObjectLocation, bytes: Vec<u8>) -> StorageResult<()> {
        let store = self.store_for(&location.bucket)?;
        let path = ObjectPath::from(location.key.as_str());
        store
            .put(&path, Bytes::from(bytes))
            .await
            .map_err(|e| map_err(location, e))?;
        Ok(())
    }
}
