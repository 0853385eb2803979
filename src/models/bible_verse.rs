//! Bible verses, including the verse of the day.

use crate::constants::DEFAULT_TRANSLATION;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A saved Bible verse.
///
/// `date` is the day the verse is featured on. Nothing stops two verses from
/// sharing a day; the verse of the day is simply the latest one dated on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BibleVerse {
    pub(crate) id: Uuid,
    pub text: String,
    pub reference: String,
    pub translation: String,
    pub date: DateTime<Utc>,
    pub is_favorite: bool,
    pub notes: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl BibleVerse {
    pub fn new(text: impl Into<String>, reference: impl Into<String>) -> Self {
        let now = Utc::now();
        BibleVerse {
            id: Uuid::new_v4(),
            text: text.into(),
            reference: reference.into(),
            translation: DEFAULT_TRANSLATION.to_string(),
            date: now,
            is_favorite: false,
            notes: None,
            created_at: now,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True if the verse is featured on `day` (UTC).
    pub fn is_dated_on(&self, day: NaiveDate) -> bool {
        self.date.date_naive() == day
    }

    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let verse = BibleVerse::new("Jesus wept.", "John 11:35");
        assert_eq!(verse.translation, "NIV");
        assert!(!verse.is_favorite);
        assert!(verse.notes.is_none());
    }

    #[test]
    fn test_is_dated_on() {
        let date = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 0).unwrap();
        let verse = BibleVerse::new("text", "Psalm 23:1").with_date(date);
        assert!(verse.is_dated_on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
        assert!(!verse.is_dated_on(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
    }

    #[test]
    fn test_toggle_favorite() {
        let mut verse = BibleVerse::new("text", "Psalm 23:1");
        verse.toggle_favorite();
        assert!(verse.is_favorite);
        verse.toggle_favorite();
        assert!(!verse.is_favorite);
    }
}
