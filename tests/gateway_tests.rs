use chrono::{Duration, TimeZone, Utc};
use faith_journal::db::{DataService, Database, SortDescriptor};
use faith_journal::errors::{AppError, DatabaseError};
use faith_journal::models::{
    BibleVerse, Devotional, JournalEntry, Mood, MoodEntry, PrayerRequest, PrayerStatus,
};
use tempfile::tempdir;

fn open_service(path: &std::path::Path) -> DataService {
    let db = Database::open(path).unwrap();
    db.initialize_schema().unwrap();
    DataService::new(db)
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("journal.db");

    let entry = JournalEntry::new("Psalm 23", "The Lord is my shepherd.")
        .with_mood(Mood::Peaceful)
        .with_tags(vec!["psalms".to_string(), "comfort".to_string()])
        .with_location("Porch");
    let mut request = PrayerRequest::new("Dad's surgery", "Steady hands for the surgeons");
    request.answer(Utc::now(), Some("Went well".to_string()));

    {
        let service = open_service(&db_path);
        service.save(&entry).unwrap();
        service.save(&request).unwrap();
    }

    let service = open_service(&db_path);
    let stored: JournalEntry = service.require(entry.id()).unwrap();
    assert_eq!(stored.title, "Psalm 23");
    assert_eq!(stored.mood, Some(Mood::Peaceful));
    assert_eq!(stored.tags, vec!["psalms", "comfort"]);
    assert_eq!(stored.location.as_deref(), Some("Porch"));
    assert_eq!(stored.date, entry.date);

    let stored: PrayerRequest = service.require(request.id()).unwrap();
    assert_eq!(stored.status(), PrayerStatus::Answered);
    assert_eq!(stored.answer_date(), request.answer_date());
    assert_eq!(stored.answer_notes.as_deref(), Some("Went well"));
}

#[test]
fn test_schema_initialization_is_idempotent() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("journal.db");

    let service = open_service(&db_path);
    service.save(&MoodEntry::new(Mood::Joyful, 9)).unwrap();

    let db = Database::open(&db_path).unwrap();
    db.initialize_schema().unwrap();
    let moods: Vec<MoodEntry> = DataService::new(db).fetch_all().unwrap();
    assert_eq!(moods.len(), 1);
}

#[test]
fn test_default_and_custom_sorts() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir.path().join("journal.db"));
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

    for (offset, title) in [(1, "Second"), (0, "First"), (2, "Third")] {
        let devotional = Devotional::new(title, "...", "Author", "Faith")
            .with_date(base + Duration::days(offset));
        service.save(&devotional).unwrap();
    }

    let newest_first: Vec<Devotional> = service.fetch_all().unwrap();
    let titles: Vec<&str> = newest_first.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);

    let by_title: Vec<Devotional> = service
        .fetch_all_sorted(SortDescriptor::ascending("title"))
        .unwrap();
    let titles: Vec<&str> = by_title.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[test]
fn test_update_and_delete_missing_records() {
    let dir = tempdir().unwrap();
    let service = open_service(&dir.path().join("journal.db"));

    let mut never_saved = BibleVerse::new("Jesus wept.", "John 11:35");
    assert!(matches!(
        service.update(&mut never_saved),
        Err(AppError::Database(DatabaseError::NotFound(_)))
    ));
    assert!(matches!(
        service.delete(&never_saved),
        Err(AppError::Database(DatabaseError::NotFound(_)))
    ));
    assert!(service.fetch::<BibleVerse>(never_saved.id()).unwrap().is_none());
}
