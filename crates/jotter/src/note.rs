//! Core note types for jotter.
//!
//! This module defines the fundamental data structures for representing
//! user-authored notes, whether typed or voice-transcribed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque unique identifier of a note.
///
/// Backed by a UUID v4 rendered as a string; callers should treat the
/// contents as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generate a fresh unique identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// View the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single user-authored note.
///
/// Notes are immutable once created; the only mutation the collection
/// supports is removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for this note.
    pub id: NoteId,

    /// When this note was created.
    pub created_at: DateTime<Utc>,

    /// The note's textual content.
    pub content: String,
}

impl Note {
    /// Create a new note with the given content.
    ///
    /// Assigns a fresh identifier and stamps the creation time with now.
    #[must_use]
    pub fn new(content: String) -> Self {
        Self {
            id: NoteId::generate(),
            created_at: Utc::now(),
            content,
        }
    }

    /// A single-line preview of the content, truncated to `max_chars`.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self.content.lines().next().unwrap_or_default();
        let mut preview: String = first_line.chars().take(max_chars).collect();
        if first_line.chars().count() > max_chars || self.content.lines().count() > 1 {
            preview.push('…');
        }
        preview
    }
}
