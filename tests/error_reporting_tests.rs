//! Integration tests for error reporting
//!
//! Tests broken table files, configured paths and the user-facing messages
//! the CLI prints for them

use rowstrength::config::AppConfig;
use rowstrength::error::ErrorSeverity;
use rowstrength::{ReferenceTables, RowStrengthError, TableError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_malformed_table_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rowing.json");
    fs::write(&path, "{\"male\": [1, 2, 3]}").unwrap();

    let err = ReferenceTables::load(Some(&path), None).unwrap_err();
    assert!(matches!(
        err,
        RowStrengthError::Table(TableError::Malformed { table: "rowing", .. })
    ));
    assert_eq!(err.severity(), ErrorSeverity::Critical);
    assert!(err.user_message().contains("damaged"));
}

#[test]
fn test_invalid_entry_names_location() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("strength.json");
    fs::write(
        &path,
        r#"{"female": {"60": {"bench-press": {"50": "heavy"}, "squat": {}, "deadlift": {}}}}"#,
    )
    .unwrap();

    let err = ReferenceTables::load(None, Some(&path)).unwrap_err();
    match err {
        RowStrengthError::Table(TableError::InvalidEntry { table, location, reason }) => {
            assert_eq!(table, "strength");
            assert_eq!(location, "female/60/bench-press/50");
            assert!(reason.contains("heavy"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_error_survives_config_context() {
    let dir = tempdir().unwrap();
    let mut config = AppConfig::default();
    config.tables.rowing_path = Some(dir.path().join("gone.json"));

    let err = config.load_tables().unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load reference tables"));

    let inner = err.downcast_ref::<RowStrengthError>().unwrap();
    assert!(inner.user_message().contains("gone.json"));
    assert_eq!(inner.severity().to_tracing_level(), tracing::Level::ERROR);
}
