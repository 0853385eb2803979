//! Devotional readings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A devotional reading the user can favorite and mark as completed.
///
/// `completion_date` is present exactly when the devotional is completed.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use faith_journal::models::Devotional;
///
/// let mut devotional = Devotional::new("Walking in Faith", "...", "David", "Faith");
/// devotional.mark_completed(Utc::now());
/// assert!(devotional.is_completed());
/// assert!(devotional.completion_date().is_some());
///
/// devotional.mark_incomplete();
/// assert!(devotional.completion_date().is_none());
/// ```
///
/// There is no way to deserialize one with a completion date but no completion:
///
/// ```compile_fail
/// use faith_journal::models::Devotional;
///
/// let json = r#"{"is_completed":false,"completion_date":"2024-01-01T00:00:00Z"}"#;
/// let _devotional: Devotional = serde_json::from_str(json).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Devotional {
    pub(crate) id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub(crate) is_completed: bool,
    pub(crate) completion_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Devotional {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Devotional {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            author: author.into(),
            category: category.into(),
            date: now,
            tags: Vec::new(),
            is_favorite: false,
            is_completed: false,
            completion_date: None,
            notes: None,
            created_at: now,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn completion_date(&self) -> Option<DateTime<Utc>> {
        self.completion_date
    }

    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.is_completed = true;
        self.completion_date = Some(at);
    }

    pub fn mark_incomplete(&mut self) {
        self.is_completed = false;
        self.completion_date = None;
    }

    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }
}
