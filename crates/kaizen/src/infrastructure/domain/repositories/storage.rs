use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::{
    domain::repositories::storage::{StorageRepository, StorageRepositoryError},
    infrastructure::database::Pool,
};

/// Key/value document store over a single sqlite table.
pub struct StorageRepositoryImpl {
    pool: Pool,
}

impl StorageRepositoryImpl {
    pub fn new<P: Into<Pool>>(pool: P) -> Self {
        Self { pool: pool.into() }
    }
}

#[async_trait]
impl StorageRepository for StorageRepositoryImpl {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageRepositoryError> {
        let value = sqlx::query(r#"SELECT value FROM kv WHERE key = ?"#)
            .bind(key)
            .fetch_optional(&self.pool as &SqlitePool)
            .await?
            .map(|row| row.get(0));

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageRepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value) VALUES (?, ?)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value"#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool as &SqlitePool)
        .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageRepositoryError> {
        sqlx::query(r#"DELETE FROM kv WHERE key = ?"#)
            .bind(key)
            .execute(&self.pool as &SqlitePool)
            .await?;

        Ok(())
    }
}
