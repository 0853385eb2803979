//! Record types stored in the journal database.
//!
//! Every record has an immutable `Uuid`, a creation timestamp, and its own
//! domain fields. Fields that are coupled by an invariant (a prayer's status
//! and answer date, a devotional's completion state) are only reachable
//! through methods that keep them consistent; everything else is public.

pub mod bible_verse;
pub mod devotional;
pub mod journal_entry;
pub mod mood_entry;
pub mod prayer_request;
pub mod subscription;
pub mod user_profile;

pub use bible_verse::BibleVerse;
pub use devotional::Devotional;
pub use journal_entry::JournalEntry;
pub use mood_entry::MoodEntry;
pub use prayer_request::{PrayerRequest, PrayerStatus};
pub use subscription::{Subscription, SubscriptionKind};
pub use user_profile::{PrivacyLevel, UserProfile};

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the writer felt.
///
/// Parsing is case-insensitive; display uses the capitalized name.
///
/// # Examples
///
/// ```
/// use faith_journal::models::Mood;
///
/// let mood: Mood = "grateful".parse().unwrap();
/// assert_eq!(mood, Mood::Grateful);
/// assert_eq!(mood.to_string(), "Grateful");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Grateful,
    Peaceful,
    Reflective,
    Challenged,
    Hopeful,
    Anxious,
    Joyful,
}

impl Mood {
    /// Every mood, in display order.
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Grateful,
        Mood::Peaceful,
        Mood::Reflective,
        Mood::Challenged,
        Mood::Hopeful,
        Mood::Anxious,
        Mood::Joyful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Grateful => "Grateful",
            Mood::Peaceful => "Peaceful",
            Mood::Reflective => "Reflective",
            Mood::Challenged => "Challenged",
            Mood::Hopeful => "Hopeful",
            Mood::Anxious => "Anxious",
            Mood::Joyful => "Joyful",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown mood: '{}'", s)))
    }
}

/// Splits a comma-separated tag list, trimming blanks and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
