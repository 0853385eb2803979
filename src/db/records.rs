//! Mapping between record types and table rows.
//!
//! Each record type implements [`Record`], which names its table, lists its
//! columns in the order they are bound and read, and picks a default sort.
//! Timestamps are stored as RFC 3339 text with nanosecond precision in UTC,
//! which sorts lexicographically and round-trips exactly.

use crate::models::{
    BibleVerse, Devotional, JournalEntry, MoodEntry, PrayerRequest, Subscription, UserProfile,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::Row;
use std::str::FromStr;
use uuid::Uuid;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// A column to order a fetch by.
///
/// The field must be one of the record's columns; the gateway rejects
/// anything else before building SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDescriptor {
    pub field: &'static str,
    pub order: SortOrder,
}

impl SortDescriptor {
    pub fn ascending(field: &'static str) -> Self {
        SortDescriptor {
            field,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(field: &'static str) -> Self {
        SortDescriptor {
            field,
            order: SortOrder::Descending,
        }
    }

    /// `ORDER BY` clause; ties fall back to insertion order.
    pub(crate) fn order_by_clause(&self) -> String {
        format!("ORDER BY {} {}, rowid ASC", self.field, self.order.as_sql())
    }
}

/// A type that lives in its own table.
pub trait Record: Sized {
    /// Table name.
    const TABLE: &'static str;

    /// Column names in bind/read order. The first column is always `id`.
    const COLUMNS: &'static [&'static str];

    fn record_id(&self) -> Uuid;

    /// Order used by `fetch_all`.
    fn default_sort() -> SortDescriptor;

    /// Values for [`Record::COLUMNS`], in the same order.
    fn to_values(&self) -> Vec<Value>;

    /// Builds a record from a row selected with [`Record::COLUMNS`].
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Called before an update is written. Types with an `updated_at`
    /// advance it here.
    fn mark_updated(&mut self, _now: DateTime<Utc>) {}
}

fn text(value: impl Into<String>) -> Value {
    Value::Text(value.into())
}

fn opt_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::Text(v.to_string()))
}

fn flag(value: bool) -> Value {
    Value::Integer(i64::from(value))
}

fn time(value: &DateTime<Utc>) -> Value {
    Value::Text(value.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

fn opt_time(value: Option<&DateTime<Utc>>) -> Value {
    value.map_or(Value::Null, time)
}

fn tags(value: &[String]) -> Value {
    Value::Text(serde_json::Value::from(value.to_vec()).to_string())
}

fn conversion_error(
    idx: usize,
    error: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(error))
}

fn get_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn get_time(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn get_opt_time(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| {
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| conversion_error(idx, e))
    })
    .transpose()
}

fn get_tags(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn get_enum<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e| conversion_error(idx, e))
}

fn get_opt_enum<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| raw.parse().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

impl Record for JournalEntry {
    const TABLE: &'static str = "journal_entries";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "content",
        "date",
        "mood",
        "tags",
        "location",
        "is_private",
        "created_at",
        "updated_at",
    ];

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn default_sort() -> SortDescriptor {
        SortDescriptor::descending("date")
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.to_string()),
            text(self.title.as_str()),
            text(self.content.as_str()),
            time(&self.date),
            opt_text(self.mood.as_ref().map(|m| m.as_str())),
            tags(&self.tags),
            opt_text(self.location.as_deref()),
            flag(self.is_private),
            time(&self.created_at),
            time(&self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(JournalEntry {
            id: get_uuid(row, 0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            date: get_time(row, 3)?,
            mood: get_opt_enum(row, 4)?,
            tags: get_tags(row, 5)?,
            location: row.get(6)?,
            is_private: row.get(7)?,
            created_at: get_time(row, 8)?,
            updated_at: get_time(row, 9)?,
        })
    }

    fn mark_updated(&mut self, now: DateTime<Utc>) {
        self.touch(now);
    }
}

impl Record for PrayerRequest {
    const TABLE: &'static str = "prayer_requests";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "details",
        "date",
        "status",
        "answer_date",
        "answer_notes",
        "tags",
        "is_private",
        "created_at",
        "updated_at",
    ];

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn default_sort() -> SortDescriptor {
        SortDescriptor::descending("date")
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.to_string()),
            text(self.title.as_str()),
            text(self.details.as_str()),
            time(&self.date),
            text(self.status.as_str()),
            opt_time(self.answer_date.as_ref()),
            opt_text(self.answer_notes.as_deref()),
            tags(&self.tags),
            flag(self.is_private),
            time(&self.created_at),
            time(&self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PrayerRequest {
            id: get_uuid(row, 0)?,
            title: row.get(1)?,
            details: row.get(2)?,
            date: get_time(row, 3)?,
            status: get_enum(row, 4)?,
            answer_date: get_opt_time(row, 5)?,
            answer_notes: row.get(6)?,
            tags: get_tags(row, 7)?,
            is_private: row.get(8)?,
            created_at: get_time(row, 9)?,
            updated_at: get_time(row, 10)?,
        })
    }

    fn mark_updated(&mut self, now: DateTime<Utc>) {
        self.touch(now);
    }
}

impl Record for BibleVerse {
    const TABLE: &'static str = "bible_verses";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "text",
        "reference",
        "translation",
        "date",
        "is_favorite",
        "notes",
        "created_at",
    ];

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn default_sort() -> SortDescriptor {
        SortDescriptor::ascending("reference")
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.to_string()),
            text(self.text.as_str()),
            text(self.reference.as_str()),
            text(self.translation.as_str()),
            time(&self.date),
            flag(self.is_favorite),
            opt_text(self.notes.as_deref()),
            time(&self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(BibleVerse {
            id: get_uuid(row, 0)?,
            text: row.get(1)?,
            reference: row.get(2)?,
            translation: row.get(3)?,
            date: get_time(row, 4)?,
            is_favorite: row.get(5)?,
            notes: row.get(6)?,
            created_at: get_time(row, 7)?,
        })
    }
}

impl Record for Devotional {
    const TABLE: &'static str = "devotionals";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "content",
        "author",
        "category",
        "date",
        "tags",
        "is_favorite",
        "is_completed",
        "completion_date",
        "notes",
        "created_at",
    ];

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn default_sort() -> SortDescriptor {
        SortDescriptor::descending("date")
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.to_string()),
            text(self.title.as_str()),
            text(self.content.as_str()),
            text(self.author.as_str()),
            text(self.category.as_str()),
            time(&self.date),
            tags(&self.tags),
            flag(self.is_favorite),
            flag(self.is_completed),
            opt_time(self.completion_date.as_ref()),
            opt_text(self.notes.as_deref()),
            time(&self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Devotional {
            id: get_uuid(row, 0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            author: row.get(3)?,
            category: row.get(4)?,
            date: get_time(row, 5)?,
            tags: get_tags(row, 6)?,
            is_favorite: row.get(7)?,
            is_completed: row.get(8)?,
            completion_date: get_opt_time(row, 9)?,
            notes: row.get(10)?,
            created_at: get_time(row, 11)?,
        })
    }
}

impl Record for UserProfile {
    const TABLE: &'static str = "user_profiles";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "email",
        "preferred_theme",
        "notifications_enabled",
        "biometric_enabled",
        "privacy_level",
        "created_at",
        "updated_at",
    ];

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn default_sort() -> SortDescriptor {
        SortDescriptor::ascending("created_at")
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.to_string()),
            text(self.name.as_str()),
            opt_text(self.email.as_deref()),
            text(self.preferred_theme.as_str()),
            flag(self.notifications_enabled),
            flag(self.biometric_enabled),
            text(self.privacy_level.as_str()),
            time(&self.created_at),
            time(&self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(UserProfile {
            id: get_uuid(row, 0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            preferred_theme: row.get(3)?,
            notifications_enabled: row.get(4)?,
            biometric_enabled: row.get(5)?,
            privacy_level: get_enum(row, 6)?,
            created_at: get_time(row, 7)?,
            updated_at: get_time(row, 8)?,
        })
    }

    fn mark_updated(&mut self, now: DateTime<Utc>) {
        self.touch(now);
    }
}

impl Record for Subscription {
    const TABLE: &'static str = "subscriptions";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "kind",
        "start_date",
        "end_date",
        "is_active",
        "auto_renew",
        "created_at",
    ];

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn default_sort() -> SortDescriptor {
        SortDescriptor::ascending("created_at")
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.to_string()),
            text(self.kind.as_str()),
            time(&self.start_date),
            opt_time(self.end_date.as_ref()),
            flag(self.is_active),
            flag(self.auto_renew),
            time(&self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Subscription {
            id: get_uuid(row, 0)?,
            kind: get_enum(row, 1)?,
            start_date: get_time(row, 2)?,
            end_date: get_opt_time(row, 3)?,
            is_active: row.get(4)?,
            auto_renew: row.get(5)?,
            created_at: get_time(row, 6)?,
        })
    }
}

impl Record for MoodEntry {
    const TABLE: &'static str = "mood_entries";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "mood",
        "intensity",
        "notes",
        "date",
        "tags",
        "created_at",
    ];

    fn record_id(&self) -> Uuid {
        self.id
    }

    fn default_sort() -> SortDescriptor {
        SortDescriptor::descending("date")
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.to_string()),
            text(self.mood.as_str()),
            Value::Integer(i64::from(self.intensity)),
            opt_text(self.notes.as_deref()),
            time(&self.date),
            tags(&self.tags),
            time(&self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(MoodEntry {
            id: get_uuid(row, 0)?,
            mood: get_enum(row, 1)?,
            intensity: row.get(2)?,
            notes: row.get(3)?,
            date: get_time(row, 4)?,
            tags: get_tags(row, 5)?,
            created_at: get_time(row, 6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assert_columns_match_values<T: Record>(record: &T) {
        assert_eq!(T::COLUMNS.len(), record.to_values().len(), "{}", T::TABLE);
        assert_eq!(T::COLUMNS[0], "id");
        assert!(T::COLUMNS.contains(&T::default_sort().field));
        assert!(T::COLUMNS.contains(&"created_at"));
    }

    #[test]
    fn test_column_lists_line_up_with_values() {
        assert_columns_match_values(&JournalEntry::new("t", "c"));
        assert_columns_match_values(&PrayerRequest::new("t", "d"));
        assert_columns_match_values(&BibleVerse::new("t", "r"));
        assert_columns_match_values(&Devotional::new("t", "c", "a", "k"));
        assert_columns_match_values(&UserProfile::new("n"));
        assert_columns_match_values(&Subscription::new(Default::default()));
        assert_columns_match_values(&MoodEntry::new(crate::models::Mood::Happy, 5));
    }

    #[test]
    fn test_time_encoding_sorts_lexicographically() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 9, 23, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 10, 1, 0, 0).unwrap();

        match (time(&earlier), time(&later)) {
            (Value::Text(a), Value::Text(b)) => assert!(a < b),
            other => panic!("Expected text values, got {:?}", other),
        }
    }

    #[test]
    fn test_tags_encode_as_json_array() {
        let value = tags(&["a".to_string(), "b, c".to_string()]);
        assert_eq!(value, Value::Text(r#"["a","b, c"]"#.to_string()));
    }

    #[test]
    fn test_order_by_clause() {
        assert_eq!(
            SortDescriptor::descending("date").order_by_clause(),
            "ORDER BY date DESC, rowid ASC"
        );
    }
}
