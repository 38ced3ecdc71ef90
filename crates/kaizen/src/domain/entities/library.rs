use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The set of followed manga, keyed by manga id.
///
/// Serializes as `{"<manga-id>": true}`. Unfollowing removes the key;
/// an explicit `false` left behind by an older document reads the same
/// as an absent key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library(HashMap<String, bool>);

impl Library {
    pub fn is_followed(&self, manga_id: &str) -> bool {
        self.0.get(manga_id).copied().unwrap_or(false)
    }

    /// Flips membership and returns the new followed state.
    pub fn toggle(&mut self, manga_id: &str) -> bool {
        if self.is_followed(manga_id) {
            self.0.remove(manga_id);
            false
        } else {
            self.0.insert(manga_id.to_string(), true);
            true
        }
    }

    pub fn manga_ids(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, followed)| **followed)
            .map(|(id, _)| id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        !self.0.values().any(|followed| *followed)
    }
}
