use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{
    entities::{chapter::ChapterRecord, manga::Manga},
    repositories::catalog::{CatalogRepository, CatalogRepositoryError},
};

const COVER_URL: &str = "https://uploads.mangadex.org/covers";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Relationship {
    #[serde(rename = "type")]
    kind: String,
    attributes: Option<serde_json::Value>,
}

impl Relationship {
    fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.as_ref()?.get(key)?.as_str()
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TagAttributes {
    group: String,
    name: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Tag {
    attributes: TagAttributes,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct MangaAttributes {
    title: HashMap<String, String>,
    description: HashMap<String, String>,
    status: String,
    year: Option<i32>,
    last_chapter: Option<String>,
    tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct MangaData {
    id: String,
    attributes: MangaAttributes,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ChapterAttributes {
    chapter: Option<String>,
    title: Option<String>,
    publish_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ChapterData {
    id: String,
    attributes: ChapterAttributes,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

fn localized(map: &HashMap<String, String>, language: &str) -> Option<String> {
    map.get(language)
        .or_else(|| map.values().next())
        .cloned()
}

fn map_manga(data: MangaData, language: &str) -> Manga {
    let attributes = data.attributes;

    let cover_url = data
        .relationships
        .iter()
        .find(|rel| rel.kind == "cover_art")
        .and_then(|rel| rel.attribute_str("fileName"))
        .map(|file_name| format!("{COVER_URL}/{}/{file_name}.256.jpg", data.id));

    let mut authors: Vec<String> = Vec::new();
    for rel in &data.relationships {
        if rel.kind != "author" && rel.kind != "artist" {
            continue;
        }
        if let Some(name) = rel.attribute_str("name") {
            if !authors.iter().any(|a| a == name) {
                authors.push(name.to_string());
            }
        }
    }

    let tags = attributes
        .tags
        .iter()
        .filter(|tag| tag.attributes.group == "genre")
        .filter_map(|tag| localized(&tag.attributes.name, language))
        .collect();

    let total_raw_chapters = attributes
        .last_chapter
        .as_deref()
        .and_then(|number| number.parse::<f64>().ok());

    Manga {
        id: data.id,
        title: localized(&attributes.title, language).unwrap_or_else(|| "Unknown".to_string()),
        description: localized(&attributes.description, language).unwrap_or_default(),
        status: attributes.status,
        year: attributes.year,
        cover_url,
        authors,
        tags,
        total_raw_chapters,
    }
}

fn map_chapter(data: ChapterData) -> ChapterRecord {
    let scan_group = data
        .relationships
        .iter()
        .find(|rel| rel.kind == "scanlation_group")
        .and_then(|rel| rel.attribute_str("name"))
        .map(|name| name.to_string());

    ChapterRecord {
        id: data.id,
        number: data.attributes.chapter,
        title: data.attributes.title.unwrap_or_default(),
        published_at: data.attributes.publish_at.unwrap_or(DateTime::UNIX_EPOCH),
        scan_group,
    }
}

/// MangaDex-backed catalogue source.
pub struct CatalogRepositoryImpl {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl CatalogRepositoryImpl {
    pub fn new(base_url: &str, language: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        }
    }
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    async fn get_manga(&self, manga_id: &str) -> Result<Manga, CatalogRepositoryError> {
        let url = format!("{}/manga/{manga_id}", self.base_url);
        let envelope: Envelope<MangaData> = self
            .client
            .get(&url)
            .query(&[
                ("includes[]", "author"),
                ("includes[]", "artist"),
                ("includes[]", "cover_art"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(map_manga(envelope.data, &self.language))
    }

    async fn get_chapter_feed(
        &self,
        manga_id: &str,
    ) -> Result<Vec<ChapterRecord>, CatalogRepositoryError> {
        let url = format!("{}/manga/{manga_id}/feed", self.base_url);
        let envelope: Envelope<Vec<ChapterData>> = self
            .client
            .get(&url)
            .query(&[
                ("translatedLanguage[]", self.language.as_str()),
                ("order[chapter]", "desc"),
                ("limit", "500"),
                ("includes[]", "scanlation_group"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(envelope.data.into_iter().map(map_chapter).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_map_manga_from_response() {
        let raw = r#"{
            "id": "m1",
            "attributes": {
                "title": {"ja": "進撃", "en": "Attack"},
                "description": {"en": "A wall story"},
                "status": "ongoing",
                "year": 2009,
                "lastChapter": "139",
                "tags": [
                    {"attributes": {"group": "genre", "name": {"en": "Action"}}},
                    {"attributes": {"group": "theme", "name": {"en": "Military"}}}
                ]
            },
            "relationships": [
                {"id": "a1", "type": "author", "attributes": {"name": "Isayama"}},
                {"id": "a1", "type": "artist", "attributes": {"name": "Isayama"}},
                {"id": "c1", "type": "cover_art", "attributes": {"fileName": "cover.jpg"}}
            ]
        }"#;
        let data: MangaData = serde_json::from_str(raw).unwrap();

        let manga = map_manga(data, "en");

        assert_eq!(manga.title, "Attack");
        assert_eq!(manga.status, "ongoing");
        assert_eq!(manga.year, Some(2009));
        assert_eq!(manga.total_raw_chapters, Some(139.0));
        assert_eq!(manga.authors, vec!["Isayama".to_string()]);
        assert_eq!(manga.tags, vec!["Action".to_string()]);
        assert_eq!(
            manga.cover_url.as_deref(),
            Some("https://uploads.mangadex.org/covers/m1/cover.jpg.256.jpg")
        );
    }

    #[test]
    fn test_map_manga_with_sparse_attributes() {
        let raw = r#"{"id": "m1", "attributes": {"title": {"ja": "進撃"}}}"#;
        let data: MangaData = serde_json::from_str(raw).unwrap();

        let manga = map_manga(data, "en");

        assert_eq!(manga.title, "進撃");
        assert_eq!(manga.description, "");
        assert_eq!(manga.total_raw_chapters, None);
        assert_eq!(manga.cover_url, None);
    }

    #[test]
    fn test_map_chapter_from_feed_entry() {
        let raw = r#"{
            "id": "c1",
            "attributes": {
                "chapter": "10.5",
                "title": "Side Story",
                "publishAt": "2024-03-01T12:00:00+00:00"
            },
            "relationships": [
                {"id": "g1", "type": "scanlation_group", "attributes": {"name": "Speedscans"}}
            ]
        }"#;
        let data: ChapterData = serde_json::from_str(raw).unwrap();

        let chapter = map_chapter(data);

        assert_eq!(chapter.id, "c1");
        assert_eq!(chapter.number.as_deref(), Some("10.5"));
        assert_eq!(chapter.title, "Side Story");
        assert_eq!(chapter.scan_group.as_deref(), Some("Speedscans"));
    }

    #[test]
    fn test_map_chapter_without_number_or_group() {
        let raw = r#"{"id": "c1", "attributes": {}}"#;
        let data: ChapterData = serde_json::from_str(raw).unwrap();

        let chapter = map_chapter(data);

        assert_eq!(chapter.number, None);
        assert_eq!(chapter.title, "");
        assert_eq!(chapter.scan_group, None);
    }
}
