//! Configuration management for the faith journal application.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults. It decides where the
//! journal database lives, where exported documents are written, and how
//! logs are formatted.
//!
//! # Environment Variables
//!
//! - `FAITH_JOURNAL_DIR`: Data directory (defaults to ~/.faith-journal)
//! - `FAITH_JOURNAL_DB`: Database file (defaults to `<data dir>/journal.db`)
//! - `FAITH_JOURNAL_EXPORT_DIR`: Export directory (defaults to the system temp directory)
//! - `FAITH_JOURNAL_LOG_FORMAT`: `text` or `json` (defaults to `text`)
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DEFAULT_DATA_SUBDIR, DEFAULT_DB_FILENAME, ENV_VAR_DATA_DIR, ENV_VAR_DB_PATH,
    ENV_VAR_EXPORT_DIR, ENV_VAR_HOME, ENV_VAR_LOG_FORMAT, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
    REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the faith journal application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use faith_journal::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/srv/journal"),
///     db_path: PathBuf::from("/srv/journal/journal.db"),
///     export_dir: PathBuf::from("/tmp"),
///     log_format: "text".to_string(),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory holding the database.
    pub data_dir: PathBuf,

    /// SQLite database file.
    pub db_path: PathBuf,

    /// Directory exported documents are written to.
    pub export_dir: PathBuf,

    /// Log output format, `text` or `json`.
    pub log_format: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .field("db_path", &REDACTED_PLACEHOLDER)
            .field("export_dir", &REDACTED_PLACEHOLDER)
            .field("log_format", &self.log_format)
            .finish()
    }
}

fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// Paths are expanded with `shellexpand`, so `~` and `$VAR` references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a path cannot be expanded.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use faith_journal::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config: {:?}", config),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_raw = non_empty_var(ENV_VAR_DATA_DIR).unwrap_or_else(|| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });
        let data_dir = expand_path(&data_dir_raw)?;

        let db_path = match non_empty_var(ENV_VAR_DB_PATH) {
            Some(raw) => expand_path(&raw)?,
            None => data_dir.join(DEFAULT_DB_FILENAME),
        };

        let export_dir = match non_empty_var(ENV_VAR_EXPORT_DIR) {
            Some(raw) => expand_path(&raw)?,
            None => env::temp_dir(),
        };

        let log_format = non_empty_var(ENV_VAR_LOG_FORMAT)
            .map(|format| format.trim().to_lowercase())
            .unwrap_or_else(|| LOG_FORMAT_TEXT.to_string());

        let config = Config {
            data_dir,
            db_path,
            export_dir,
            log_format,
        };
        debug!("Loaded configuration: {:?}", config);

        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any path is empty or relative, or the
    /// log format is not `text` or `json`.
    pub fn validate(&self) -> AppResult<()> {
        check_absolute("Data directory", &self.data_dir)?;
        check_absolute("Database path", &self.db_path)?;
        check_absolute("Export directory", &self.export_dir)?;

        if self.log_format != LOG_FORMAT_TEXT && self.log_format != LOG_FORMAT_JSON {
            return Err(AppError::Config(format!(
                "Unknown log format '{}', expected '{}' or '{}'",
                self.log_format, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            )));
        }

        Ok(())
    }

    /// Creates the data directory and the database's parent directory if missing.
    pub fn ensure_data_dir_exists(&self) -> AppResult<()> {
        ensure_dir_exists(&self.data_dir)?;
        if let Some(parent) = self.db_path.parent() {
            ensure_dir_exists(parent)?;
        }
        Ok(())
    }
}

fn check_absolute(label: &str, path: &Path) -> AppResult<()> {
    if path.as_os_str().is_empty() {
        return Err(AppError::Config(format!("{} path is empty", label)));
    }
    if !path.is_absolute() {
        return Err(AppError::Config(format!(
            "{} must be an absolute path",
            label
        )));
    }
    Ok(())
}

/// Creates `dir` and its parents, owner-only on Unix.
///
/// # Errors
///
/// Returns `AppError::Io` if the directory cannot be created.
pub fn ensure_dir_exists(dir: &Path) -> AppResult<()> {
    if dir.exists() {
        return Ok(());
    }

    debug!("Creating directory");

    #[cfg(unix)]
    {
        use crate::constants::DEFAULT_DIR_PERMISSIONS;
        use std::os::unix::fs::DirBuilderExt;

        fs::DirBuilder::new()
            .recursive(true)
            .mode(DEFAULT_DIR_PERMISSIONS)
            .create(dir)?;
    }

    #[cfg(not(unix))]
    {
        fs::create_dir_all(dir)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn valid_config() -> Config {
        Config {
            data_dir: PathBuf::from("/srv/journal"),
            db_path: PathBuf::from("/srv/journal/journal.db"),
            export_dir: PathBuf::from("/tmp/exports"),
            log_format: LOG_FORMAT_TEXT.to_string(),
        }
    }

    fn clear_env() {
        for key in [
            ENV_VAR_DATA_DIR,
            ENV_VAR_DB_PATH,
            ENV_VAR_EXPORT_DIR,
            ENV_VAR_LOG_FORMAT,
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_debug_impl_redacts_paths() {
        let mut config = valid_config();
        config.data_dir = PathBuf::from("/home/username/private/journal");

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("/home/username/private/journal"));
        assert!(debug_output.contains("text"));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_relative_paths() {
        let mut config = valid_config();
        config.db_path = PathBuf::from("journal.db");

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Database path must be an absolute path"))
            }
            other => panic!("Expected Config error about relative path, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_empty_path() {
        let mut config = valid_config();
        config.export_dir = PathBuf::new();

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Export directory path is empty"))
            }
            other => panic!("Expected Config error about empty path, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_log_format() {
        let mut config = valid_config();
        config.log_format = "xml".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.log_format = LOG_FORMAT_JSON.to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_with_custom_dir() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        env::set_var(ENV_VAR_DATA_DIR, temp_dir.path());

        let config = Config::load().unwrap();
        clear_env();

        assert_eq!(config.data_dir, temp_dir.path());
        assert_eq!(config.db_path, temp_dir.path().join(DEFAULT_DB_FILENAME));
        assert_eq!(config.export_dir, env::temp_dir());
        assert_eq!(config.log_format, LOG_FORMAT_TEXT);
    }

    #[test]
    #[serial]
    fn test_load_db_and_log_overrides() {
        clear_env();
        env::set_var(ENV_VAR_DATA_DIR, "/srv/journal");
        env::set_var(ENV_VAR_DB_PATH, "/var/lib/faith/other.db");
        env::set_var(ENV_VAR_LOG_FORMAT, " JSON ");

        let config = Config::load().unwrap();
        clear_env();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/faith/other.db"));
        assert_eq!(config.log_format, LOG_FORMAT_JSON);
    }

    #[test]
    fn test_ensure_data_dir_exists() {
        let temp_dir = tempdir().unwrap();
        let mut config = valid_config();
        config.data_dir = temp_dir.path().join("data");
        config.db_path = temp_dir.path().join("elsewhere").join("journal.db");

        config.ensure_data_dir_exists().unwrap();

        assert!(config.data_dir.is_dir());
        assert!(temp_dir.path().join("elsewhere").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_data_dir_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let dir = temp_dir.path().join("private");
        ensure_dir_exists(&dir).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
