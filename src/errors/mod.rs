//! Error handling utilities for the faith journal application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Internal errors are not shown to users directly. At the application boundary
//! they are classified into a [`RawFailure`] and normalized into a [`UserError`],
//! which an [`ErrorReporter`] holds until the user acknowledges it.

pub mod presentable;
pub mod reporter;

pub use presentable::{normalize, RawFailure, UserError};
pub use reporter::{ErrorReporter, ReportState};

use crate::constants::{
    STORAGE_DELETE_FAILED, STORAGE_DELETE_LOCKED, STORAGE_READ_FAILED, STORAGE_SAVE_REJECTED,
    STORAGE_UNAVAILABLE, STORAGE_WRITE_FAILED, STORAGE_WRITE_NO_PERMISSION,
};
use rusqlite::ErrorCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur during database operations.
///
/// Failures of the three gateway operations carry the table they happened on,
/// so they can be mapped onto storage-domain codes (see [`DatabaseError::storage_code`]).
///
/// # Examples
///
/// ```
/// use faith_journal::errors::DatabaseError;
///
/// let error = DatabaseError::NotFound("journal_entries 42".to_string());
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A record could not be inserted or updated.
    #[error("Failed to save record in {table}: {source}")]
    Save {
        /// Table the record belongs to
        table: &'static str,
        /// The underlying SQLite error
        #[source]
        source: rusqlite::Error,
    },

    /// Records could not be read.
    #[error("Failed to read records from {table}: {source}")]
    Fetch {
        /// Table that was queried
        table: &'static str,
        /// The underlying SQLite error
        #[source]
        source: rusqlite::Error,
    },

    /// A record could not be removed.
    #[error("Failed to delete record from {table}: {source}")]
    Delete {
        /// Table the record belongs to
        table: &'static str,
        /// The underlying SQLite error
        #[source]
        source: rusqlite::Error,
    },

    /// SQLite error outside of a gateway operation (schema setup, pragmas).
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other faith-journal instances.")]
    Pool(#[from] r2d2::Error),

    /// Requested record not found in database.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

impl DatabaseError {
    /// Returns the storage-domain code for this failure.
    ///
    /// Save failures map to 256/257/134030, delete failures to 4/5, and
    /// everything else to read (259) or availability (260) codes.
    pub fn storage_code(&self) -> i64 {
        match self {
            DatabaseError::Save { source, .. } => match source.sqlite_error_code() {
                Some(ErrorCode::ConstraintViolation) => STORAGE_SAVE_REJECTED,
                Some(ErrorCode::ReadOnly) | Some(ErrorCode::PermissionDenied) => {
                    STORAGE_WRITE_NO_PERMISSION
                }
                _ => STORAGE_WRITE_FAILED,
            },
            DatabaseError::Delete { source, .. } => match source.sqlite_error_code() {
                Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
                    STORAGE_DELETE_LOCKED
                }
                _ => STORAGE_DELETE_FAILED,
            },
            DatabaseError::Sqlite(source) => match source.sqlite_error_code() {
                Some(ErrorCode::CannotOpen) | Some(ErrorCode::NotADatabase) => STORAGE_UNAVAILABLE,
                _ => STORAGE_READ_FAILED,
            },
            DatabaseError::Pool(_) => STORAGE_UNAVAILABLE,
            DatabaseError::Fetch { .. } | DatabaseError::NotFound(_) | DatabaseError::Custom(_) => {
                STORAGE_READ_FAILED
            }
        }
    }
}

/// Represents errors that can occur while exporting a record.
///
/// Rendering itself cannot fail; only persisting the rendered document can.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The rendered document could not be written to disk.
    #[error("Failed to write document to {path}: {source}")]
    WriteFailed {
        /// Destination path of the document
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the faith journal application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use faith_journal::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use faith_journal::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors raised while exporting a record.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Input that violates a record invariant or cannot be parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use faith_journal::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::InvalidInput("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn sqlite_error(code: std::os::raw::c_int) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(code), None)
    }

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let app_io_error = AppError::Io(io_error);
        assert_eq!(format!("{}", app_io_error), "I/O error: permission denied");

        let invalid = AppError::InvalidInput("bad date".to_string());
        assert_eq!(format!("{}", invalid), "Invalid input: bad date");

        let export = AppError::Export(ExportError::WriteFailed {
            path: PathBuf::from("/nowhere/entry.pdf"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        });
        assert!(format!("{}", export).contains("/nowhere/entry.pdf"));
    }

    #[test]
    fn test_save_failure_codes() {
        let error = DatabaseError::Save {
            table: "journal_entries",
            source: sqlite_error(ffi::SQLITE_CONSTRAINT),
        };
        assert_eq!(error.storage_code(), STORAGE_SAVE_REJECTED);

        let error = DatabaseError::Save {
            table: "journal_entries",
            source: sqlite_error(ffi::SQLITE_READONLY),
        };
        assert_eq!(error.storage_code(), STORAGE_WRITE_NO_PERMISSION);

        let error = DatabaseError::Save {
            table: "journal_entries",
            source: sqlite_error(ffi::SQLITE_IOERR),
        };
        assert_eq!(error.storage_code(), STORAGE_WRITE_FAILED);
    }

    #[test]
    fn test_delete_failure_codes() {
        let error = DatabaseError::Delete {
            table: "prayer_requests",
            source: sqlite_error(ffi::SQLITE_BUSY),
        };
        assert_eq!(error.storage_code(), STORAGE_DELETE_LOCKED);

        let error = DatabaseError::Delete {
            table: "prayer_requests",
            source: sqlite_error(ffi::SQLITE_IOERR),
        };
        assert_eq!(error.storage_code(), STORAGE_DELETE_FAILED);
    }

    #[test]
    fn test_other_database_codes() {
        let error = DatabaseError::Fetch {
            table: "bible_verses",
            source: sqlite_error(ffi::SQLITE_BUSY),
        };
        assert_eq!(error.storage_code(), STORAGE_READ_FAILED);

        let error = DatabaseError::Sqlite(sqlite_error(ffi::SQLITE_CANTOPEN));
        assert_eq!(error.storage_code(), STORAGE_UNAVAILABLE);
    }
}
