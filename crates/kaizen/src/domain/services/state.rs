use serde::{Serialize, de::DeserializeOwned};

use crate::domain::{
    entities::{history::History, library::Library},
    repositories::storage::StorageRepository,
};

/// Storage key for the followed-manga document.
pub const LIBRARY_KEY: &str = "kaizen-library";
/// Storage key for the read-history document.
pub const HISTORY_KEY: &str = "kaizen-history";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Unhydrated,
    Hydrated,
}

/// Mutation accepted before hydration, replayed in order once the
/// persisted documents are loaded.
#[derive(Debug)]
enum PendingOp {
    ToggleFollow(String),
    MarkRead(String, String),
    ClearHistory,
}

/// Single source of truth for the followed-manga library and the
/// per-manga read history.
///
/// In-memory state is authoritative for the lifetime of the process;
/// every mutation writes its own map through to storage as a whole
/// snapshot. A failed write is logged and never rolls memory back, so
/// the next successful write carries the latest state.
///
/// Until [`hydrate`](Self::hydrate) completes, queries report
/// default-empty instead of blocking and mutations queue safely.
pub struct ReadingStateService<S>
where
    S: StorageRepository,
{
    storage: S,
    library: Library,
    history: History,
    lifecycle: Lifecycle,
    pending: Vec<PendingOp>,
}

impl<S> ReadingStateService<S>
where
    S: StorageRepository,
{
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            library: Library::default(),
            history: History::default(),
            lifecycle: Lifecycle::Unhydrated,
            pending: Vec::new(),
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.lifecycle == Lifecycle::Hydrated
    }

    /// Loads both documents from storage and replays mutations queued
    /// while unhydrated. Never fails: an unreadable or malformed
    /// document falls back to empty for that map only.
    pub async fn hydrate(&mut self) {
        if self.is_hydrated() {
            return;
        }

        self.library = self.load_document(LIBRARY_KEY).await;
        self.history = self.load_document(HISTORY_KEY).await;
        self.lifecycle = Lifecycle::Hydrated;

        for op in std::mem::take(&mut self.pending) {
            match op {
                PendingOp::ToggleFollow(manga_id) => {
                    self.toggle_follow(&manga_id).await;
                }
                PendingOp::MarkRead(manga_id, chapter_id) => {
                    self.mark_chapter_read(&manga_id, &chapter_id).await;
                }
                PendingOp::ClearHistory => {
                    self.clear_history().await;
                }
            }
        }
    }

    /// Flips library membership and returns the new followed state.
    /// Unfollowing removes the key entirely rather than flagging it
    /// false, so toggling an id never seen before inserts it.
    pub async fn toggle_follow(&mut self, manga_id: &str) -> bool {
        if !self.is_hydrated() {
            self.pending
                .push(PendingOp::ToggleFollow(manga_id.to_string()));
            return !self.library.is_followed(manga_id);
        }

        let followed = self.library.toggle(manga_id);
        self.persist(LIBRARY_KEY, &self.library).await;

        followed
    }

    pub fn is_followed(&self, manga_id: &str) -> bool {
        self.is_hydrated() && self.library.is_followed(manga_id)
    }

    /// Followed manga ids, unordered.
    pub fn followed(&self) -> Vec<&str> {
        if !self.is_hydrated() {
            return Vec::new();
        }
        self.library.manga_ids().collect()
    }

    /// Records the chapter as read. Returns false when it was already
    /// recorded, in which case nothing is re-persisted.
    pub async fn mark_chapter_read(&mut self, manga_id: &str, chapter_id: &str) -> bool {
        if !self.is_hydrated() {
            self.pending.push(PendingOp::MarkRead(
                manga_id.to_string(),
                chapter_id.to_string(),
            ));
            return !self.history.is_read(manga_id, chapter_id);
        }

        let inserted = self.history.mark_read(manga_id, chapter_id);
        if inserted {
            self.persist(HISTORY_KEY, &self.history).await;
        }

        inserted
    }

    pub fn is_chapter_read(&self, manga_id: &str, chapter_id: &str) -> bool {
        self.is_hydrated() && self.history.is_read(manga_id, chapter_id)
    }

    /// Read chapter ids for a manga, oldest mark first.
    pub fn chapters_read(&self, manga_id: &str) -> &[String] {
        if !self.is_hydrated() {
            return &[];
        }
        self.history.chapters(manga_id)
    }

    /// Wipes read history for every manga. The library is untouched.
    pub async fn clear_history(&mut self) {
        if !self.is_hydrated() {
            self.pending.push(PendingOp::ClearHistory);
            return;
        }

        self.history.clear();
        self.persist(HISTORY_KEY, &self.history).await;
    }

    async fn load_document<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.storage.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(document) => document,
                Err(e) => {
                    warn!("malformed document {key}, starting fresh: {e}");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                warn!("failed to load {key}, starting fresh: {e}");
                T::default()
            }
        }
    }

    async fn persist<T>(&self, key: &str, document: &T)
    where
        T: Serialize,
    {
        let raw = match serde_json::to_string(document) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to serialize {key}: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.set(key, &raw).await {
            warn!("failed to persist {key}, keeping in-memory state: {e}");
        }
    }
}
