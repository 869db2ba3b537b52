use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use url::Url;
use wellmerge_core::key::ObjectLocation;

use super::ObjectStorage;
use crate::error::{StorageError, StorageResult};

/// Local filesystem storage: `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build from a `file:///abs/path` URI.
    pub fn from_uri(uri: &str) -> StorageResult<Self> {
        let parsed = Url::parse(uri)
            .map_err(|e| StorageError::Config(format!("invalid file URI '{uri}': {e}")))?;
        let root = parsed
            .to_file_path()
            .map_err(|_| StorageError::Config(format!("'{uri}' is not an absolute file path")))?;
        Ok(Self::new(root))
    }

    fn path_for(&self, location: &ObjectLocation) -> StorageResult<PathBuf> {
        check_segment(&location.bucket)?;
        let key = Path::new(&location.key);
        let escapes = key
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if location.key.is_empty() || escapes {
            return Err(StorageError::InvalidKey(location.key.clone()));
        }
        Ok(self.root.join(&location.bucket).join(key))
    }
}

fn check_segment(bucket: &str) -> StorageResult<()> {
    if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
        return Err(StorageError::InvalidKey(bucket.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ObjectStorage for FsStorage {
    async fn get(&self, location: &ObjectLocation) -> StorageResult<Vec<u8>> {
        let path = self.path_for(location)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(location.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, location: &ObjectLocation, bytes: Vec<u8>) -> StorageResult<()> {
        let path = self.path_for(location)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }
}
