use faith_journal::db::{DataService, Database};
use faith_journal::errors::{AppError, ErrorReporter, RawFailure, UserError};
use faith_journal::models::JournalEntry;
use uuid::Uuid;

fn service() -> DataService {
    let db = Database::open_in_memory().unwrap();
    db.initialize_schema().unwrap();
    DataService::new(db)
}

#[test]
fn test_missing_record_is_reported_as_not_found() {
    let service = service();
    let err = service
        .delete_by_id::<JournalEntry>(Uuid::new_v4())
        .unwrap_err();

    let mut reporter = ErrorReporter::new();
    reporter.report(&err);

    let shown = reporter.current_error().unwrap();
    assert_eq!(shown, &UserError::NotFound);
    assert_eq!(shown.id(), "not_found");
    assert_eq!(
        shown.recovery_suggestion(),
        "If the problem persists, please contact support."
    );
}

#[test]
fn test_rejected_write_is_reported_as_save_failed() {
    let service = service();

    let conn = service.database().get_conn().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_entries BEFORE INSERT ON journal_entries
         BEGIN SELECT RAISE(ABORT, 'journal is read only'); END;",
    )
    .unwrap();
    drop(conn);

    let err = service
        .save(&JournalEntry::new("Evening", "Thankful"))
        .unwrap_err();
    assert!(err.to_string().contains("journal_entries"));

    let mut reporter = ErrorReporter::new();
    reporter.report(&err);
    let shown = reporter.current_error().unwrap();
    assert_eq!(shown, &UserError::SaveFailed);
    assert!(shown.recovery_suggestion().contains("stable internet connection"));

    let entries: Vec<JournalEntry> = service.fetch_all().unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_last_report_wins_until_cleared() {
    let mut reporter = ErrorReporter::new();

    reporter.report(AppError::InvalidInput("bad date".to_string()));
    reporter.report(RawFailure::Network {
        message: "offline".to_string(),
    });

    assert_eq!(
        reporter.current_error(),
        Some(&UserError::Network("offline".to_string()))
    );

    reporter.clear();
    assert!(!reporter.is_presenting());

    reporter.report(AppError::InvalidInput("bad date".to_string()));
    assert_eq!(reporter.current_error(), Some(&UserError::InvalidData));
}
