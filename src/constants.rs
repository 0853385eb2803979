//! Constants used throughout the application.
//!
//! This module contains all constants used in Faith Journal, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "faith-journal";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A personal devotional journal: entries, prayers, verses and devotionals";
/// Display name written into exported documents.
pub const APP_DISPLAY_NAME: &str = "Faith Journal";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "faith-journal";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Configuration Keys & Environment Variables
/// Environment variable for the data directory.
pub const ENV_VAR_DATA_DIR: &str = "FAITH_JOURNAL_DIR";
/// Environment variable overriding the database file location.
pub const ENV_VAR_DB_PATH: &str = "FAITH_JOURNAL_DB";
/// Environment variable for the directory exported documents are written to.
pub const ENV_VAR_EXPORT_DIR: &str = "FAITH_JOURNAL_EXPORT_DIR";
/// Environment variable selecting the log format (`text` or `json`).
pub const ENV_VAR_LOG_FORMAT: &str = "FAITH_JOURNAL_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default data directory, relative to the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".faith-journal";
/// Database file name inside the data directory.
pub const DEFAULT_DB_FILENAME: &str = "journal.db";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Database
/// Maximum number of pooled SQLite connections.
pub const DB_POOL_MAX_SIZE: u32 = 5;
/// Milliseconds a connection waits on a locked database before failing.
pub const DB_BUSY_TIMEOUT_MS: u64 = 5_000;

// Storage-domain failure codes reported by the persistence gateway.
/// A write to the store failed.
pub const STORAGE_WRITE_FAILED: i64 = 256;
/// A write was refused because the store is read-only or inaccessible.
pub const STORAGE_WRITE_NO_PERMISSION: i64 = 257;
/// A save was rejected by a store constraint.
pub const STORAGE_SAVE_REJECTED: i64 = 134_030;
/// A delete failed.
pub const STORAGE_DELETE_FAILED: i64 = 4;
/// A delete was blocked because the store is busy or locked.
pub const STORAGE_DELETE_LOCKED: i64 = 5;
/// A read from the store failed.
pub const STORAGE_READ_FAILED: i64 = 259;
/// The store could not be reached at all.
pub const STORAGE_UNAVAILABLE: i64 = 260;
/// Storage codes that normalize to a failed save.
pub const STORAGE_SAVE_CODES: &[i64] = &[
    STORAGE_WRITE_FAILED,
    STORAGE_WRITE_NO_PERMISSION,
    STORAGE_SAVE_REJECTED,
];
/// Storage codes that normalize to a failed delete.
pub const STORAGE_DELETE_CODES: &[i64] = &[STORAGE_DELETE_FAILED, STORAGE_DELETE_LOCKED];

// Record Defaults
/// Default Bible translation for new verses.
pub const DEFAULT_TRANSLATION: &str = "NIV";
/// Default theme name for new user profiles.
pub const DEFAULT_THEME: &str = "default";
/// Lowest allowed mood intensity.
pub const MOOD_INTENSITY_MIN: u8 = 1;
/// Highest allowed mood intensity.
pub const MOOD_INTENSITY_MAX: u8 = 10;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Long-form date used in exports, e.g. "January 15, 2024 at 2:30 PM".
pub const EXPORT_DATE_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";

// Document Export Layout (PDF points, top-left origin)
/// US Letter page width.
pub const PAGE_WIDTH: f32 = 612.0;
/// US Letter page height.
pub const PAGE_HEIGHT: f32 = 792.0;
/// Margin on every side of the page.
pub const PAGE_MARGIN: f32 = 50.0;
/// Baseline offset of the title from the top of the page.
pub const TITLE_Y: f32 = 60.0;
/// Offset of the date line from the top of the page.
pub const DATE_Y: f32 = 100.0;
/// Offset where the body text rectangle starts.
pub const BODY_Y: f32 = 130.0;
/// Offset of the tags footer from the top of the page.
pub const TAGS_FOOTER_Y: f32 = PAGE_HEIGHT - 60.0;
/// Title font size.
pub const TITLE_FONT_SIZE: f32 = 24.0;
/// Body font size.
pub const BODY_FONT_SIZE: f32 = 14.0;
/// Font size for the date line and tags footer.
pub const CAPTION_FONT_SIZE: f32 = 12.0;
/// Line height multiplier applied to the body font size.
pub const BODY_LINE_SPACING: f32 = 1.2;
/// Gray level for secondary text (0 = black, 1 = white).
pub const SECONDARY_TEXT_GRAY: f32 = 0.4;
/// File extension for exported documents.
pub const DOCUMENT_EXTENSION: &str = "pdf";
