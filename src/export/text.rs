//! Plain-text rendering of journal entries.

use crate::constants::EXPORT_DATE_FORMAT;
use crate::models::JournalEntry;
use chrono::{Local, TimeZone};
use std::fmt::Display;

/// Formats an entry date the way exports show it, e.g. "January 15, 2024 at 2:30 PM".
pub fn format_export_date<Tz>(entry: &JournalEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    entry
        .date
        .with_timezone(tz)
        .format(EXPORT_DATE_FORMAT)
        .to_string()
}

/// Renders an entry as plain text using the local time zone.
pub fn to_plain_text(entry: &JournalEntry) -> String {
    to_plain_text_in(entry, &Local)
}

/// Renders an entry as plain text with its date shown in `tz`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use faith_journal::export::to_plain_text_in;
/// use faith_journal::models::JournalEntry;
///
/// let entry = JournalEntry::new("Grace", "Enough for today.")
///     .with_date(Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap());
///
/// assert_eq!(
///     to_plain_text_in(&entry, &Utc),
///     "Grace\n=====\n\nDate: January 15, 2024 at 2:30 PM\n\nEnough for today.\n"
/// );
/// ```
pub fn to_plain_text_in<Tz>(entry: &JournalEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let underline = "=".repeat(entry.title.chars().count());
    let mut text = format!(
        "{}\n{}\n\nDate: {}\n\n{}\n",
        entry.title,
        underline,
        format_export_date(entry, tz),
        entry.content
    );

    if !entry.tags.is_empty() {
        text.push_str(&format!("Tags: {}\n", entry.tags.join(", ")));
    }

    if let Some(mood) = entry.mood {
        text.push_str(&format!("Mood: {}\n", mood));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use chrono::{FixedOffset, Utc};

    fn sample_entry() -> JournalEntry {
        JournalEntry::new("Morning Prayer", "Thankful for rest.")
            .with_date(Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap())
    }

    #[test]
    fn test_tags_and_mood_lines() {
        let entry = sample_entry()
            .with_tags(vec!["gratitude".to_string(), "rest".to_string()])
            .with_mood(Mood::Grateful);

        assert_eq!(
            to_plain_text_in(&entry, &Utc),
            "Morning Prayer\n==============\n\nDate: January 15, 2024 at 2:30 PM\n\n\
             Thankful for rest.\nTags: gratitude, rest\nMood: Grateful\n"
        );
    }

    #[test]
    fn test_tags_without_mood_end_the_text() {
        let entry = sample_entry().with_tags(vec!["a".to_string(), "b".to_string()]);
        let text = to_plain_text_in(&entry, &Utc);

        assert!(text.starts_with("Morning Prayer\n==============\n\n"));
        assert!(text.ends_with("Thankful for rest.\nTags: a, b\n"));
        assert!(!text.contains("Mood:"));
    }

    #[test]
    fn test_no_tags_or_mood_lines_when_absent() {
        let text = to_plain_text_in(&sample_entry(), &Utc);
        assert!(!text.contains("Tags:"));
        assert!(!text.contains("Mood:"));
        assert!(text.ends_with("Thankful for rest.\n"));
    }

    #[test]
    fn test_underline_counts_characters() {
        let entry = JournalEntry::new("Día", "");
        let text = to_plain_text_in(&entry, &Utc);
        assert!(text.starts_with("Día\n===\n"));
    }

    #[test]
    fn test_date_uses_given_zone() {
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let text = to_plain_text_in(&sample_entry(), &eastern);
        assert!(text.contains("Date: January 15, 2024 at 9:30 AM"));
    }
}
