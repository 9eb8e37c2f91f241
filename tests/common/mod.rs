//! Shared helpers for integration tests.

use std::path::{Path, PathBuf};

/// Two valid statements followed by one that references a missing table.
pub const SCENARIO: &str =
    "CREATE TABLE t(id INTEGER);#INSERT INTO t VALUES(1);#INSERT INTO bogus VALUES(1);";

/// Write a script file into `dir` and return its path.
pub fn write_script(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write script");
    path
}

/// Count rows in `table` through a fresh connection, so only committed
/// data is visible.
pub fn count_rows(db: &Path, table: &str) -> i64 {
    let conn = rusqlite::Connection::open(db).expect("failed to open database");
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .expect("failed to count rows")
}
