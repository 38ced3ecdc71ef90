use async_trait::async_trait;

use thiserror::Error;

use crate::domain::entities::{chapter::ChapterRecord, manga::Manga};

#[derive(Debug, Error)]
pub enum CatalogRepositoryError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    BadResponse(String),
}

/// External source of manga and chapter metadata.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn get_manga(&self, manga_id: &str) -> Result<Manga, CatalogRepositoryError>;

    /// Chapters for a manga, newest first by chapter number, as ordered
    /// by the source.
    async fn get_chapter_feed(
        &self,
        manga_id: &str,
    ) -> Result<Vec<ChapterRecord>, CatalogRepositoryError>;
}
