//! Journal entries.

use super::Mood;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A written journal entry.
///
/// `date` is when the entry is about and defaults to the moment it was
/// created; `updated_at` moves forward each time the entry is updated
/// through the gateway.
///
/// # Examples
///
/// ```
/// use faith_journal::models::{JournalEntry, Mood};
///
/// let entry = JournalEntry::new("Morning", "Thankful for rest.")
///     .with_mood(Mood::Grateful)
///     .with_tags(vec!["gratitude".to_string()]);
///
/// assert_eq!(entry.date, entry.created_at());
/// assert!(!entry.is_private);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub(crate) id: Uuid,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub is_private: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        JournalEntry {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            date: now,
            mood: None,
            tags: Vec::new(),
            location: None,
            is_private: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(now);
    }
}
