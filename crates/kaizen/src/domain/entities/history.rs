use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-manga log of read chapter ids, insertion order preserved.
///
/// Serializes as `{"<manga-id>": ["<chapter-id>", ...]}`. A chapter id
/// appears at most once per manga.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(HashMap<String, Vec<String>>);

impl History {
    pub fn is_read(&self, manga_id: &str, chapter_id: &str) -> bool {
        self.0
            .get(manga_id)
            .map(|chapters| chapters.iter().any(|c| c == chapter_id))
            .unwrap_or(false)
    }

    /// Appends the chapter to the manga's read log. Returns false if it
    /// was already recorded, leaving the log untouched.
    pub fn mark_read(&mut self, manga_id: &str, chapter_id: &str) -> bool {
        let chapters = self.0.entry(manga_id.to_string()).or_default();
        if chapters.iter().any(|c| c == chapter_id) {
            return false;
        }
        chapters.push(chapter_id.to_string());
        true
    }

    pub fn chapters(&self, manga_id: &str) -> &[String] {
        self.0
            .get(manga_id)
            .map(|chapters| chapters.as_slice())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut history = History::default();

        assert!(history.mark_read("m1", "c10"));
        assert!(!history.mark_read("m1", "c10"));

        assert_eq!(history.chapters("m1"), ["c10".to_string()]);
    }

    #[test]
    fn test_read_order_is_preserved() {
        let mut history = History::default();

        history.mark_read("m1", "c3");
        history.mark_read("m1", "c1");
        history.mark_read("m1", "c2");

        assert_eq!(
            history.chapters("m1"),
            ["c3".to_string(), "c1".to_string(), "c2".to_string()]
        );
    }

    #[test]
    fn test_clear_drops_every_manga() {
        let mut history = History::default();

        history.mark_read("m1", "c1");
        history.mark_read("m2", "c1");
        history.clear();

        assert!(history.chapters("m1").is_empty());
        assert!(history.chapters("m2").is_empty());
    }
}
