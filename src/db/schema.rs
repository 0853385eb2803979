//! Database schema definitions and initialization.
//!
//! This module defines the SQLite schema for every record type. Invariants
//! that tie two columns together are repeated as CHECK constraints so a bad
//! write is rejected by the store even if it bypasses the record methods.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use tracing::{debug, info};

/// Version written to `schema_version` on first initialization.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates every record table, its indexes and the version table.
///
/// Safe to run against an existing store; nothing is dropped or altered.
///
/// # Tables
///
/// - `journal_entries`
/// - `prayer_requests`
/// - `bible_verses`
/// - `devotionals`
/// - `user_profiles`
/// - `subscriptions`
/// - `mood_entries`
/// - `schema_version`
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS journal_entries (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            date TEXT NOT NULL,
            mood TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            location TEXT,
            is_private INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_journal_entries_date ON journal_entries(date DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS prayer_requests (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            details TEXT NOT NULL,
            date TEXT NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('Active', 'Answered', 'Archived')),
            answer_date TEXT,
            answer_notes TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            is_private INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CHECK(answer_date IS NULL OR status = 'Answered')
        );

        CREATE INDEX IF NOT EXISTS idx_prayer_requests_date ON prayer_requests(date DESC);
        CREATE INDEX IF NOT EXISTS idx_prayer_requests_status ON prayer_requests(status);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS bible_verses (
            id TEXT PRIMARY KEY NOT NULL,
            text TEXT NOT NULL,
            reference TEXT NOT NULL,
            translation TEXT NOT NULL DEFAULT 'NIV',
            date TEXT NOT NULL,
            is_favorite INTEGER NOT NULL DEFAULT 0,
            notes TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_bible_verses_reference ON bible_verses(reference);
        CREATE INDEX IF NOT EXISTS idx_bible_verses_date ON bible_verses(date DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS devotionals (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            author TEXT NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]',
            is_favorite INTEGER NOT NULL DEFAULT 0,
            is_completed INTEGER NOT NULL DEFAULT 0,
            completion_date TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            CHECK((is_completed = 1) = (completion_date IS NOT NULL))
        );

        CREATE INDEX IF NOT EXISTS idx_devotionals_date ON devotionals(date DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_profiles (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT,
            preferred_theme TEXT NOT NULL DEFAULT 'default',
            notifications_enabled INTEGER NOT NULL DEFAULT 1,
            biometric_enabled INTEGER NOT NULL DEFAULT 0,
            privacy_level TEXT NOT NULL CHECK(privacy_level IN ('Public', 'Friends', 'Private')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS subscriptions (
            id TEXT PRIMARY KEY NOT NULL,
            kind TEXT NOT NULL CHECK(kind IN ('Free', 'Premium', 'Family')),
            start_date TEXT NOT NULL,
            end_date TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            auto_renew INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            CHECK(end_date IS NULL OR kind != 'Free')
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS mood_entries (
            id TEXT PRIMARY KEY NOT NULL,
            mood TEXT NOT NULL,
            intensity INTEGER NOT NULL CHECK(intensity BETWEEN 1 AND 10),
            notes TEXT,
            date TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_mood_entries_date ON mood_entries(date DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL,
            applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    let current_version = get_schema_version(conn)?;
    if current_version.is_none() {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?)",
            [SCHEMA_VERSION],
        )
        .map_err(DatabaseError::Sqlite)?;
        info!("Recorded schema version {}", SCHEMA_VERSION);
    } else {
        debug!("Store already at schema version {:?}", current_version);
    }

    Ok(())
}

/// The recorded schema version, or `None` for a store that has never been
/// initialized.
pub fn get_schema_version(conn: &Connection) -> AppResult<Option<i32>> {
    let has_table: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(DatabaseError::Sqlite)?;
    if !has_table {
        return Ok(None);
    }

    let version = conn
        .query_row(
            "SELECT MAX(version) FROM schema_version",
            [],
            |row| row.get::<_, Option<i32>>(0),
        )
        .map_err(DatabaseError::Sqlite)?;
    Ok(version)
}
