use thiserror::Error;

use wellmerge_core::key::ObjectLocation;

/// Result type local to wellmerge-io storage backends.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object {0} does not exist")]
    NotFound(ObjectLocation),

    #[error("invalid object key '{0}'")]
    InvalidKey(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("storage configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

impl From<StorageError> for wellmerge_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(location) => wellmerge_core::Error::NotFound {
                location: location.to_string(),
            },
            StorageError::Config(msg) => wellmerge_core::Error::Config(msg),
            other => wellmerge_core::Error::Storage(other.to_string()),
        }
    }
}
