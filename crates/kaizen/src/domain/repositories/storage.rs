use async_trait::async_trait;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageRepositoryError {
    #[error("database error: {0}")]
    DbError(#[from] sqlx::Error),
    #[error("other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// On-device key/value document store. Values are opaque strings and
/// must round-trip exactly through `set` then `get`.
#[async_trait]
pub trait StorageRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageRepositoryError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageRepositoryError>;

    async fn delete(&self, key: &str) -> Result<(), StorageRepositoryError>;
}
