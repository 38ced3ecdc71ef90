//! Chapter sequence resolution over a feed as supplied by the
//! catalogue: ordered newest first by chapter number. The feed is
//! trusted as-is and never re-sorted; adjacency is derived purely from
//! linear position, so the resolver works on whatever slice of the
//! series it is given.

use crate::domain::entities::chapter::ChapterRecord;

/// Navigation neighbors of a chapter within a feed.
///
/// The feed is descending, so the chronologically earlier chapter (the
/// one to catch up on) sits one step toward the end and the later
/// chapter (the next to read) one step toward the front.
#[derive(Debug, Default, Clone, Copy)]
pub struct Neighbors<'a> {
    /// Previous chapter to read, toward the oldest end of the feed.
    pub predecessor: Option<&'a ChapterRecord>,
    /// Next chapter to read, toward the newest end of the feed.
    pub successor: Option<&'a ChapterRecord>,
}

/// Position of the chapter with a matching id, or `None` if the feed no
/// longer carries it (e.g. removed between listing and open).
pub fn locate(feed: &[ChapterRecord], chapter_id: &str) -> Option<usize> {
    feed.iter().position(|chapter| chapter.id == chapter_id)
}

/// Neighbors of the chapter at `index`. An absent or out-of-range index
/// yields both neighbors absent.
pub fn neighbors(feed: &[ChapterRecord], index: Option<usize>) -> Neighbors<'_> {
    let Some(index) = index.filter(|i| *i < feed.len()) else {
        return Neighbors::default();
    };

    Neighbors {
        predecessor: feed.get(index + 1),
        successor: index.checked_sub(1).and_then(|i| feed.get(i)),
    }
}

/// Decimal chapter number of the newest feed entry.
pub fn latest_chapter_number(feed: &[ChapterRecord]) -> Option<&str> {
    feed.first()?.number.as_deref()
}

/// How many chapters the scanlation trails the raw release, floored at
/// zero. A missing or non-numeric latest chapter number counts as zero.
pub fn compute_gap(latest_chapter_number: Option<&str>, total_raw_chapters: f64) -> f64 {
    let latest = latest_chapter_number
        .and_then(|number| number.parse::<f64>().ok())
        .filter(|number| number.is_finite())
        .unwrap_or(0.0);

    (total_raw_chapters - latest).max(0.0)
}
