use thiserror::Error;

use crate::domain::{
    entities::{chapter::ChapterRecord, manga::Manga},
    repositories::catalog::{CatalogRepository, CatalogRepositoryError},
    services::navigation,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("repository error: {0}")]
    RepositoryError(#[from] CatalogRepositoryError),
}

pub struct CatalogService<R>
where
    R: CatalogRepository,
{
    repo: R,
}

impl<R> CatalogService<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn fetch_manga(&self, manga_id: &str) -> Result<Manga, CatalogError> {
        let manga = self.repo.get_manga(manga_id).await?;

        Ok(manga)
    }

    /// Chapter feed for a manga, newest first. A failed fetch collapses
    /// to an empty feed; the reader sees no chapters rather than an
    /// error.
    pub async fn fetch_chapter_feed(&self, manga_id: &str) -> Vec<ChapterRecord> {
        match self.repo.get_chapter_feed(manga_id).await {
            Ok(feed) => feed,
            Err(e) => {
                warn!("failed to fetch chapter feed for {manga_id}: {e}");
                Vec::new()
            }
        }
    }

    /// Gap between the raw release and the newest scanlated chapter.
    pub fn gap(&self, manga: &Manga, feed: &[ChapterRecord]) -> f64 {
        navigation::compute_gap(
            navigation::latest_chapter_number(feed),
            manga.total_raw_chapters.unwrap_or(0.0),
        )
    }
}

#[cfg(test)]
mod test {
    use async_trait::async_trait;

    use super::*;

    struct EmptyFeedOnError;

    #[async_trait]
    impl CatalogRepository for EmptyFeedOnError {
        async fn get_manga(&self, _manga_id: &str) -> Result<Manga, CatalogRepositoryError> {
            Err(CatalogRepositoryError::BadResponse("boom".to_string()))
        }

        async fn get_chapter_feed(
            &self,
            _manga_id: &str,
        ) -> Result<Vec<ChapterRecord>, CatalogRepositoryError> {
            Err(CatalogRepositoryError::BadResponse("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn test_feed_fetch_failure_collapses_to_empty() {
        let service = CatalogService::new(EmptyFeedOnError);

        assert!(service.fetch_chapter_feed("m1").await.is_empty());
    }

    #[tokio::test]
    async fn test_manga_fetch_failure_surfaces() {
        let service = CatalogService::new(EmptyFeedOnError);

        assert!(service.fetch_manga("m1").await.is_err());
    }

    #[test]
    fn test_gap_uses_raw_chapter_total() {
        let service = CatalogService::new(EmptyFeedOnError);
        let manga = Manga {
            id: "m1".to_string(),
            title: "Title".to_string(),
            description: String::new(),
            status: "ongoing".to_string(),
            year: None,
            cover_url: None,
            authors: Vec::new(),
            tags: Vec::new(),
            total_raw_chapters: Some(12.0),
        };
        let feed = vec![ChapterRecord {
            id: "c1".to_string(),
            number: Some("10.5".to_string()),
            title: String::new(),
            published_at: Default::default(),
            scan_group: None,
        }];

        assert_eq!(service.gap(&manga, &feed), 1.5);

        let unknown_total = Manga {
            total_raw_chapters: None,
            ..manga
        };
        assert_eq!(service.gap(&unknown_total, &feed), 0.0);
    }
}
