//! Schema creation and upgrade entry point.
//!
//! # Responsibility
//! - Bring a database up to the schema this binary expects.
//!
//! # Invariants
//! - The applied schema version is mirrored to `PRAGMA user_version`.
//! - Upgrades run inside one transaction; a failed upgrade leaves the prior
//!   version intact.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const INIT_SCHEMA_SQL: &str = include_str!("0001_init.sql");

/// Schema version this binary reads and writes.
pub const LATEST_SCHEMA_VERSION: u32 = 1;

/// Brings the connection's schema up to `LATEST_SCHEMA_VERSION`.
///
/// Databases stamped with a newer version are rejected so an older binary
/// never destroys data it does not understand.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let db_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    if db_version > LATEST_SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: LATEST_SCHEMA_VERSION,
        });
    }
    if db_version == LATEST_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    if db_version < 1 {
        tx.execute_batch(INIT_SCHEMA_SQL)?;
    }
    tx.execute_batch(&format!("PRAGMA user_version = {LATEST_SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}
