//! Mood check-ins.

use super::Mood;
use crate::constants::{MOOD_INTENSITY_MAX, MOOD_INTENSITY_MIN};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A single mood check-in with an intensity between 1 and 10.
///
/// ```compile_fail
/// use faith_journal::models::MoodEntry;
///
/// let _entry: MoodEntry = serde_json::from_str(r#"{"mood":"Happy","intensity":42}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodEntry {
    pub(crate) id: Uuid,
    pub mood: Mood,
    pub(crate) intensity: u8,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl MoodEntry {
    /// Creates a check-in, clamping `intensity` into 1..=10.
    pub fn new(mood: Mood, intensity: u8) -> Self {
        let now = Utc::now();
        MoodEntry {
            id: Uuid::new_v4(),
            mood,
            intensity: clamp_intensity(intensity),
            notes: None,
            date: now,
            tags: Vec::new(),
            created_at: now,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: u8) {
        self.intensity = clamp_intensity(intensity);
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub(crate) fn clamp_intensity(intensity: u8) -> u8 {
    intensity.clamp(MOOD_INTENSITY_MIN, MOOD_INTENSITY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_is_clamped() {
        assert_eq!(MoodEntry::new(Mood::Happy, 0).intensity(), 1);
        assert_eq!(MoodEntry::new(Mood::Happy, 42).intensity(), 10);
        assert_eq!(MoodEntry::new(Mood::Happy, 7).intensity(), 7);

        let mut entry = MoodEntry::new(Mood::Anxious, 5);
        entry.set_intensity(11);
        assert_eq!(entry.intensity(), 10);
    }
}
