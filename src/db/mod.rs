//! Database operations for journal records.
//!
//! This module provides SQLite storage for every record type. It uses
//! connection pooling via r2d2, and every mutating call commits on its own.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `records`: Row mapping for each record type
//! - `gateway`: Generic save/fetch/update/delete and the `DataService` facade
//!
//! # Example
//!
//! ```no_run
//! use faith_journal::db::{Database, DataService};
//! use faith_journal::models::JournalEntry;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/journal.db"))?;
//! db.initialize_schema()?;
//!
//! let service = DataService::new(db);
//! service.save(&JournalEntry::new("Morning", "Grateful for today."))?;
//! let entries = service.fetch_all::<JournalEntry>()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod gateway;
pub mod records;
pub mod schema;

pub use gateway::DataService;
pub use records::{Record, SortDescriptor, SortOrder};

use crate::constants::{DB_BUSY_TIMEOUT_MS, DB_POOL_MAX_SIZE};
use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates a SQLite database file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database file cannot be opened or is not a database
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(DB_POOL_MAX_SIZE)
            .connection_customizer(Box::new(ConnectionConfig))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        let database = Database { pool };
        database.check_connection()?;

        info!("Database opened successfully");
        Ok(database)
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// every SQLite in-memory connection is its own database.
    pub fn open_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .min_idle(Some(1))
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_customizer(Box::new(ConnectionConfig))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        let database = Database { pool };
        database.check_connection()?;
        Ok(database)
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }

    // Reading the schema cookie fails fast on files that are not databases.
    fn check_connection(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(DatabaseError::Sqlite)?;
        Ok(())
    }
}

/// Connection customizer applied to every pooled connection.
#[derive(Debug)]
struct ConnectionConfig;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionConfig {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.busy_timeout(Duration::from_millis(DB_BUSY_TIMEOUT_MS))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_database_open_and_connect() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        let conn = db.get_conn().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);
    }

    #[test]
    fn test_garbage_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("not_a_db.db");
        fs::write(&db_path, vec![0x42u8; 4096]).unwrap();

        assert!(Database::open(&db_path).is_err());
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();
    }

    #[test]
    fn test_in_memory_database_keeps_state_between_calls() {
        let db = Database::open_in_memory().unwrap();
        db.initialize_schema().unwrap();

        let conn = db.get_conn().unwrap();
        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'journal_entries'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
