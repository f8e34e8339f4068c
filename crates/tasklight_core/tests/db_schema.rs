use tasklight_core::db::migrations::LATEST_SCHEMA_VERSION;
use tasklight_core::db::{open_db, open_db_in_memory, DbError};

fn user_version(conn: &rusqlite::Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn fresh_database_is_stamped_with_latest_version() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(user_version(&conn), LATEST_SCHEMA_VERSION);
}

#[test]
fn reopening_an_up_to_date_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.sqlite3");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();

    assert_eq!(user_version(&conn), LATEST_SCHEMA_VERSION);
    // Schema objects exist and are queryable.
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn foreign_keys_are_enabled() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn future_schema_versions_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.sqlite3");

    drop(open_db(&path).unwrap());
    let raw = rusqlite::Connection::open(&path).unwrap();
    raw.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(raw);

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion {
            db_version: 42,
            latest_supported: LATEST_SCHEMA_VERSION,
        }
    ));
}
