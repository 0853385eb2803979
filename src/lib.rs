/*!
# Faith Journal

Faith Journal is the core of a personal devotional journal: journal entries,
prayer requests, Bible verses, devotionals, mood check-ins, a user profile and
a subscription record, all kept in a local SQLite store.

## Architecture

- `models`: The seven record types and their invariants
- `db`: SQLite storage and the `DataService` gateway (save, fetch, update, delete)
- `errors`: Internal error types, the user-facing taxonomy and the `ErrorReporter`
- `export`: Plain-text and PDF rendering of journal entries
- `ops`: Workflows built on the gateway (answering prayers, verse of the day, ...)
- `config`: Environment-based configuration
- `cli`: Command-line interface handling using clap

## Usage Example

```rust,no_run
use faith_journal::models::JournalEntry;
use faith_journal::{Config, DataService, Database};

fn main() -> faith_journal::AppResult<()> {
    let config = Config::load()?;
    config.ensure_data_dir_exists()?;

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    let service = DataService::new(db);

    service.save(&JournalEntry::new("Morning", "Grateful for today."))?;
    Ok(())
}
```
*/

/// Command-line interface for parsing and running user commands
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// SQLite storage and the persistence gateway
pub mod db;
/// Error types, normalization and reporting
pub mod errors;
/// Exporting entries as text or PDF
pub mod export;
/// Record types
pub mod models;
/// High-level workflows
pub mod ops;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use db::{DataService, Database};
pub use errors::{AppError, AppResult, ErrorReporter, UserError};
pub use export::Exporter;
