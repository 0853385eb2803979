//! Mood check-in summaries.

use crate::db::DataService;
use crate::errors::AppResult;
use crate::models::{Mood, MoodEntry};
use chrono::{DateTime, Utc};

/// Aggregate view over a set of mood check-ins.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodSummary {
    pub total: usize,
    /// Check-ins per mood, in [`Mood::ALL`] order, moods with zero omitted.
    pub counts: Vec<(Mood, usize)>,
    pub average_intensity: Option<f64>,
    /// Most logged mood; ties go to the one earlier in [`Mood::ALL`].
    pub most_frequent: Option<Mood>,
}

/// Summarizes `entries`.
pub fn summarize_moods(entries: &[MoodEntry]) -> MoodSummary {
    let counts: Vec<(Mood, usize)> = Mood::ALL
        .iter()
        .map(|mood| (*mood, entries.iter().filter(|e| e.mood == *mood).count()))
        .filter(|(_, count)| *count > 0)
        .collect();

    let most_frequent = counts
        .iter()
        .fold(None::<(Mood, usize)>, |best, &(mood, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((mood, count)),
        })
        .map(|(mood, _)| mood);

    let average_intensity = if entries.is_empty() {
        None
    } else {
        let sum: u32 = entries.iter().map(|e| u32::from(e.intensity())).sum();
        Some(f64::from(sum) / entries.len() as f64)
    };

    MoodSummary {
        total: entries.len(),
        counts,
        average_intensity,
        most_frequent,
    }
}

/// Summarizes stored check-ins, optionally only those dated at or after `since`.
pub fn mood_summary(
    service: &DataService,
    since: Option<DateTime<Utc>>,
) -> AppResult<MoodSummary> {
    let entries: Vec<MoodEntry> = service.fetch_all()?;
    let entries: Vec<MoodEntry> = match since {
        Some(since) => entries.into_iter().filter(|e| e.date >= since).collect(),
        None => entries,
    };
    Ok(summarize_moods(&entries))
}
