//! Database connection management.
//!
//! A run uses exactly one connection: opened at start, optionally extended
//! with SpatiaLite, and closed explicitly at the end so close errors surface.

use std::path::Path;

use rusqlite::{Connection, LoadExtensionGuard};
use spatial_init_common::{Error, Result};

/// Default SpatiaLite loadable module name, resolved by the dynamic loader.
pub const DEFAULT_SPATIALITE_EXTENSION: &str = "mod_spatialite";

/// Open (creating if needed) the database file at `db_path`.
///
/// When `extension` is set, the named loadable extension is loaded into the
/// connection before it is returned. Any failure here is fatal for a run.
///
/// # Example
///
/// ```no_run
/// use spatial_init_db::connection::{open_database, DEFAULT_SPATIALITE_EXTENSION};
/// use std::path::Path;
///
/// let conn = open_database(Path::new("network.sqlite"), Some(DEFAULT_SPATIALITE_EXTENSION)).unwrap();
/// ```
pub fn open_database(db_path: &Path, extension: Option<&str>) -> Result<Connection> {
    let existed = db_path.exists();

    let conn = Connection::open(db_path).map_err(|e| {
        Error::database(format!(
            "Failed to open database {}: {}",
            db_path.display(),
            e
        ))
    })?;

    if let Some(name) = extension {
        if let Err(e) = load_extension(&conn, name) {
            drop(conn);
            // Don't leave an empty file behind for a run that never started
            if !existed {
                if let Err(rm) = std::fs::remove_file(db_path) {
                    tracing::warn!("Failed to remove {}: {}", db_path.display(), rm);
                }
            }
            return Err(e);
        }
    }

    tracing::info!("Opened database {}", db_path.display());
    Ok(conn)
}

/// Open an in-memory database, mainly for tests.
pub fn open_memory(extension: Option<&str>) -> Result<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::database(format!("Failed to open in-memory database: {}", e)))?;

    if let Some(name) = extension {
        load_extension(&conn, name)?;
    }

    Ok(conn)
}

/// Load a SQLite loadable extension (e.g. `mod_spatialite`) into `conn`.
///
/// Extension loading is enabled only for the duration of the call.
pub fn load_extension(conn: &Connection, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input("extension name cannot be empty"));
    }

    // SAFETY: the extension is trusted operator configuration; loading is
    // disabled again when the guard drops.
    unsafe {
        let _guard = LoadExtensionGuard::new(conn)
            .map_err(|e| Error::extension(format!("Failed to enable extension loading: {}", e)))?;
        conn.load_extension(name, None)
            .map_err(|e| Error::extension(format!("Failed to load {}: {}", name, e)))?;
    }

    tracing::debug!("Loaded extension {}", name);
    Ok(())
}

/// Close the connection, reporting any error SQLite raises on close.
pub fn close(conn: Connection) -> Result<()> {
    conn.close()
        .map_err(|(_, e)| Error::database(format!("Failed to close database: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_database_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.sqlite");
        assert!(!path.exists());

        let conn = open_database(&path, None).unwrap();
        conn.execute_batch("CREATE TABLE t(id INTEGER);").unwrap();
        close(conn).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_open_database_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/network.sqlite");

        let err = open_database(&path, None).unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_extension_failure_removes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.sqlite");

        let err = open_database(&path, Some("definitely_not_a_sqlite_extension")).unwrap_err();
        assert!(matches!(err, Error::Extension(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_extension_failure_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.sqlite");
        let conn = open_database(&path, None).unwrap();
        conn.execute_batch("CREATE TABLE t(id INTEGER);").unwrap();
        close(conn).unwrap();

        assert!(open_database(&path, Some("definitely_not_a_sqlite_extension")).is_err());
        assert!(path.exists());
    }

    #[test]
    fn test_unknown_extension_is_fatal() {
        let err = open_memory(Some("definitely_not_a_sqlite_extension")).unwrap_err();
        assert!(matches!(err, Error::Extension(_)));
        assert!(err.to_string().contains("definitely_not_a_sqlite_extension"));
    }

    #[test]
    fn test_empty_extension_name_rejected() {
        let conn = open_memory(None).unwrap();
        let err = load_extension(&conn, "  ").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
