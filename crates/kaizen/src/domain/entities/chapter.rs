use chrono::{DateTime, Utc};

/// A chapter as supplied by the catalogue source, normalized from its
/// response envelope. `number` stays a decimal string ("10.5") because
/// source numbering is not integral; it may be missing for oneshots.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterRecord {
    pub id: String,
    pub number: Option<String>,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub scan_group: Option<String>,
}
