//! The note collection and its persistence.
//!
//! `NoteStore` owns the ordered list of notes (newest first) and mirrors
//! it into the key-value [`Storage`] as one serialized JSON blob on every
//! mutation. There is no incremental diffing: each create/delete rewrites
//! the whole collection with a single `set` call.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::note::{Note, NoteId};
use crate::storage::Storage;

/// Fixed key under which the serialized note collection is stored.
pub const NOTES_KEY: &str = "notes";

/// The ordered note collection, backed by persistent storage.
///
/// Insertion order is strictly newest-first; identifiers are unique
/// within the collection.
#[derive(Debug)]
pub struct NoteStore {
    storage: Storage,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Load the note collection from storage.
    ///
    /// An absent or unparsable blob yields an empty collection; the
    /// failure is logged but never surfaced, so a corrupt database never
    /// blocks startup.
    #[must_use]
    pub fn load(storage: Storage) -> Self {
        let notes = match storage.get(NOTES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => {
                    debug!(count = notes.len(), "loaded note collection");
                    notes
                }
                Err(err) => {
                    warn!("stored note collection is unparsable, starting empty: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("failed to read note collection, starting empty: {err}");
                Vec::new()
            }
        };

        Self { storage, notes }
    }

    /// Create a note from the given content and persist the collection.
    ///
    /// The new note is prepended so the newest note always appears first.
    /// Returns a clone of the created note.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyNote`] for empty or whitespace-only content,
    /// or a storage error if persisting fails (in which case the
    /// in-memory collection is left unchanged).
    pub fn create(&mut self, content: impl Into<String>) -> Result<Note> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(Error::EmptyNote);
        }

        let note = Note::new(content);
        self.notes.insert(0, note.clone());
        if let Err(err) = self.persist() {
            self.notes.remove(0);
            return Err(err);
        }

        debug!(id = %note.id, "created note");
        Ok(note)
    }

    /// Delete the note with the given identifier and persist the collection.
    ///
    /// Returns whether a note was removed; a missing identifier is a
    /// no-op, not an error. The collection is persisted either way.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails (the in-memory collection is
    /// restored to its prior state).
    pub fn delete(&mut self, id: &NoteId) -> Result<bool> {
        let Some(pos) = self.notes.iter().position(|note| &note.id == id) else {
            debug!(id = %id, "delete: no matching note");
            self.persist()?;
            return Ok(false);
        };

        let removed = self.notes.remove(pos);
        if let Err(err) = self.persist() {
            self.notes.insert(pos, removed);
            return Err(err);
        }

        debug!(id = %id, "deleted note");
        Ok(true)
    }

    /// Search notes by content.
    ///
    /// Performs a case-insensitive substring match. An empty (or
    /// whitespace-only) query returns the full collection unfiltered, in
    /// original order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.notes.iter().collect();
        }

        self.notes
            .iter()
            .filter(|note| note.content.to_lowercase().contains(&needle))
            .collect()
    }

    /// All notes, newest first.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Rewrite the whole persisted collection in one storage call.
    fn persist(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.notes)?;
        self.storage.set(NOTES_KEY, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> NoteStore {
        NoteStore::load(Storage::open_in_memory().expect("failed to create test storage"))
    }

    /// Read the persisted blob back through a fresh deserialization.
    fn persisted_notes(store: &NoteStore) -> Vec<Note> {
        let raw = store
            .storage
            .get(NOTES_KEY)
            .unwrap()
            .expect("collection should be persisted");
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_load_empty_storage() {
        let store = create_test_store();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_load_unparsable_blob_falls_back_to_empty() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set(NOTES_KEY, "not json at all").unwrap();

        let store = NoteStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_falls_back_to_empty() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set(NOTES_KEY, r#"{"id": "lonely-object"}"#).unwrap();

        let store = NoteStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_returns_note() {
        let mut store = create_test_store();
        let note = store.create("Buy milk").unwrap();

        assert_eq!(note.content, "Buy milk");
        assert_eq!(store.len(), 1);
        assert_eq!(store.notes()[0], note);
    }

    #[test]
    fn test_create_rejects_empty_content() {
        let mut store = create_test_store();
        assert!(matches!(store.create(""), Err(Error::EmptyNote)));
        assert!(matches!(store.create("   \n"), Err(Error::EmptyNote)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_newest_note_is_always_first() {
        let mut store = create_test_store();
        store.create("first").unwrap();
        store.create("second").unwrap();
        let third = store.create("third").unwrap();

        assert_eq!(store.notes()[0], third);
        let contents: Vec<_> = store.notes().iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_persisted_collection_matches_memory_after_each_operation() {
        let mut store = create_test_store();

        let a = store.create("alpha").unwrap();
        assert_eq!(persisted_notes(&store), store.notes());

        store.create("beta").unwrap();
        assert_eq!(persisted_notes(&store), store.notes());

        store.delete(&a.id).unwrap();
        assert_eq!(persisted_notes(&store), store.notes());
    }

    #[test]
    fn test_roundtrip_through_storage() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("jotter_store_roundtrip_{}.db", std::process::id()));

        {
            let mut store = NoteStore::load(Storage::open(&db_path).unwrap());
            store.create("remember me").unwrap();
        }

        let store = NoteStore::load(Storage::open(&db_path).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.notes()[0].content, "remember me");

        drop(store);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_delete_removes_note() {
        let mut store = create_test_store();
        let note = store.create("to delete").unwrap();

        assert!(store.delete(&note.id).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_nonexistent_is_noop() {
        let mut store = create_test_store();
        store.create("keep me").unwrap();

        let removed = store.delete(&NoteId::from("no-such-id")).unwrap();
        assert!(!removed);
        assert_eq!(store.len(), 1);
        assert_eq!(persisted_notes(&store), store.notes());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut store = create_test_store();
        store.create("Buy milk").unwrap();

        assert_eq!(store.search("milk").len(), 1);
        assert_eq!(store.search("MILK").len(), 1);
        assert_eq!(store.search("Milk").len(), 1);
        assert!(store.search("eggs").is_empty());
    }

    #[test]
    fn test_search_empty_query_returns_all_in_order() {
        let mut store = create_test_store();
        store.create("one").unwrap();
        store.create("two").unwrap();

        let all = store.search("");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].content, "two");
        assert_eq!(all[1].content, "one");

        assert_eq!(store.search("   ").len(), 2);
    }

    #[test]
    fn test_search_matches_substring() {
        let mut store = create_test_store();
        store.create("call the plumber tomorrow").unwrap();

        assert_eq!(store.search("plumb").len(), 1);
        assert_eq!(store.search("tomorrow").len(), 1);
        assert!(store.search("yesterday").is_empty());
    }

    #[test]
    fn test_search_unicode_content() {
        let mut store = create_test_store();
        store.create("Comprar PÃO na padaria").unwrap();

        assert_eq!(store.search("pão").len(), 1);
    }

    #[test]
    fn test_duplicate_content_creates_distinct_notes() {
        let mut store = create_test_store();
        let a = store.create("same text").unwrap();
        let b = store.create("same text").unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }
}
