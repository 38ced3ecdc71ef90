/// A manga title, normalized from the catalogue source.
///
/// `total_raw_chapters` is the last chapter number known for the
/// original-language release, possibly stale. It feeds the gap metric
/// against the newest scanlated chapter.
#[derive(Debug, Clone)]
pub struct Manga {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub year: Option<i32>,
    pub cover_url: Option<String>,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub total_raw_chapters: Option<f64>,
}
