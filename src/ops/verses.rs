//! Bible verse workflows, including the verse of the day.

use crate::db::{DataService, SortDescriptor};
use crate::errors::AppResult;
use crate::models::BibleVerse;
use chrono::{Datelike, NaiveDate};
use tracing::debug;
use uuid::Uuid;

/// Chooses the verse to feature on `day` from `verses`.
///
/// A verse dated on that day wins; if several are, the first in `verses`
/// does (callers pass them newest first). Otherwise the pick rotates through
/// `verses` by the day's ordinal, so the same day always gets the same verse.
pub fn pick_verse_for_day(verses: &[BibleVerse], day: NaiveDate) -> Option<&BibleVerse> {
    if let Some(dated) = verses.iter().find(|verse| verse.is_dated_on(day)) {
        return Some(dated);
    }

    if verses.is_empty() {
        return None;
    }

    let ordinal = day.num_days_from_ce().unsigned_abs() as usize;
    verses.get(ordinal % verses.len())
}

/// The verse of the day for `day`, if any verses are stored.
pub fn verse_of_the_day(service: &DataService, day: NaiveDate) -> AppResult<Option<BibleVerse>> {
    let verses: Vec<BibleVerse> = service.fetch_all_sorted(SortDescriptor::descending("date"))?;
    let picked = pick_verse_for_day(&verses, day).cloned();

    debug!(
        "Verse of the day for {}: {:?}",
        day,
        picked.as_ref().map(|verse| verse.reference.as_str())
    );
    Ok(picked)
}

/// Flips the favorite flag of a stored verse.
pub fn toggle_verse_favorite(service: &DataService, id: Uuid) -> AppResult<BibleVerse> {
    let mut verse: BibleVerse = service.require(id)?;
    verse.toggle_favorite();
    service.update(&mut verse)?;
    Ok(verse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::test_service;
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dated_verse_wins() {
        let service = test_service();
        let morning = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        service
            .save(&BibleVerse::new("Earlier", "Genesis 1:1").with_date(earlier))
            .unwrap();
        service
            .save(&BibleVerse::new("Morning", "Psalm 5:3").with_date(morning))
            .unwrap();
        service
            .save(&BibleVerse::new("Evening", "Psalm 4:8").with_date(evening))
            .unwrap();

        let picked = verse_of_the_day(&service, day(2024, 5, 1)).unwrap().unwrap();
        assert_eq!(picked.reference, "Psalm 4:8");
    }

    #[test]
    fn test_fallback_is_stable_for_a_day() {
        let verses: Vec<BibleVerse> = ["A 1:1", "B 1:1", "C 1:1"]
            .iter()
            .map(|reference| {
                BibleVerse::new("text", *reference)
                    .with_date(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
            })
            .collect();

        let first = pick_verse_for_day(&verses, day(2024, 5, 2)).unwrap();
        let again = pick_verse_for_day(&verses, day(2024, 5, 2)).unwrap();
        let next = pick_verse_for_day(&verses, day(2024, 5, 3)).unwrap();

        assert_eq!(first.id(), again.id());
        assert_ne!(first.id(), next.id());
    }

    #[test]
    fn test_no_verses() {
        let service = test_service();
        assert!(verse_of_the_day(&service, day(2024, 5, 1)).unwrap().is_none());
    }

    #[test]
    fn test_toggle_favorite_persists() {
        let service = test_service();
        let verse = BibleVerse::new("The Lord is my shepherd", "Psalm 23:1");
        service.save(&verse).unwrap();

        assert!(toggle_verse_favorite(&service, verse.id()).unwrap().is_favorite);
        let stored: BibleVerse = service.require(verse.id()).unwrap();
        assert!(stored.is_favorite);

        assert!(!toggle_verse_favorite(&service, verse.id()).unwrap().is_favorite);
    }
}
