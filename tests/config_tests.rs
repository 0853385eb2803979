use faith_journal::config::Config;
use faith_journal::errors::AppError;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::tempdir;

const VARS: [&str; 4] = [
    "FAITH_JOURNAL_DIR",
    "FAITH_JOURNAL_DB",
    "FAITH_JOURNAL_EXPORT_DIR",
    "FAITH_JOURNAL_LOG_FORMAT",
];

fn clear_env() {
    for key in VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_default_data_dir_under_home() {
    clear_env();
    let original_home = env::var("HOME").ok();
    let home = tempdir().unwrap();
    env::set_var("HOME", home.path());

    let config = Config::load().unwrap();

    match original_home {
        Some(value) => env::set_var("HOME", value),
        None => env::remove_var("HOME"),
    }

    assert_eq!(config.data_dir, home.path().join(".faith-journal"));
    assert_eq!(config.db_path, home.path().join(".faith-journal").join("journal.db"));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_tilde_expansion() {
    clear_env();
    env::set_var("FAITH_JOURNAL_DIR", "/srv/faith");
    env::set_var("FAITH_JOURNAL_EXPORT_DIR", "~/exports");

    let config = Config::load().unwrap();
    clear_env();

    assert!(!config.export_dir.to_string_lossy().contains('~'));
    assert!(config.export_dir.is_absolute());
    assert!(config.export_dir.ends_with("exports"));
}

#[test]
#[serial]
fn test_blank_variables_fall_back_to_defaults() {
    clear_env();
    env::set_var("FAITH_JOURNAL_DB", "   ");
    env::set_var("FAITH_JOURNAL_LOG_FORMAT", "");
    env::set_var("FAITH_JOURNAL_DIR", "/srv/faith");

    let config = Config::load().unwrap();
    clear_env();

    assert_eq!(config.db_path, PathBuf::from("/srv/faith/journal.db"));
    assert_eq!(config.log_format, "text");
}

#[test]
#[serial]
fn test_unknown_log_format_fails_validation() {
    clear_env();
    env::set_var("FAITH_JOURNAL_DIR", "/srv/faith");
    env::set_var("FAITH_JOURNAL_LOG_FORMAT", "yaml");

    let config = Config::load().unwrap();
    clear_env();

    match config.validate() {
        Err(AppError::Config(message)) => assert!(message.contains("yaml")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
