//! Batch SQL runner.
//!
//! Statements run in script order inside a single transaction. A failing
//! statement is recorded and rolled back to its own savepoint; it never
//! aborts the batch and never rolls back earlier statements. The
//! transaction is committed once, after the last attempt.

use std::path::PathBuf;
use std::time::Instant;

use rusqlite::{Connection, DropBehavior, Transaction};
use spatial_init_common::{Error, Result};

use crate::connection;
use crate::report::{BatchReport, StatementError, StatementOutcome};
use crate::script::{self, SplitMode};

/// Inputs for a complete run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Target database file, created if missing
    pub database_path: PathBuf,
    /// Script holding the statements
    pub script_path: PathBuf,
    pub split: SplitMode,
    /// Loadable extension to load after opening, e.g. `mod_spatialite`
    pub extension: Option<String>,
}

impl RunOptions {
    pub fn new(database_path: impl Into<PathBuf>, script_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            script_path: script_path.into(),
            split: SplitMode::default(),
            extension: None,
        }
    }

    pub fn with_split(mut self, split: SplitMode) -> Self {
        self.split = split;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

/// Run a script file against a database file.
///
/// The script is read before the database is opened, so an unreadable
/// script leaves the target untouched. `on_outcome` is called after every
/// attempt, in order, before the next statement runs.
///
/// # Errors
///
/// Fails only on setup problems: unreadable script, database open or
/// extension load failure, or a failed begin/commit/close. Statement
/// failures are reported through the returned [`BatchReport`].
pub fn run_batch<F>(options: &RunOptions, on_outcome: F) -> Result<BatchReport>
where
    F: FnMut(&StatementOutcome),
{
    let text = script::read_script(&options.script_path)?;
    let statements = script::split_script(&text, options.split);

    tracing::info!(
        "Loaded {} statements from {} (split: {})",
        statements.len(),
        options.script_path.display(),
        options.split
    );

    let mut conn =
        connection::open_database(&options.database_path, options.extension.as_deref())?;

    let report = run_statements(&mut conn, statements, on_outcome)?;

    connection::close(conn)?;
    Ok(report)
}

/// Execute `statements` on `conn` in one transaction, committing at the end.
pub fn run_statements<F>(
    conn: &mut Connection,
    statements: Vec<String>,
    mut on_outcome: F,
) -> Result<BatchReport>
where
    F: FnMut(&StatementOutcome),
{
    let batch_start = Instant::now();
    let mut outcomes = Vec::with_capacity(statements.len());

    let mut tx = conn
        .transaction()
        .map_err(|e| Error::database(format!("Failed to begin transaction: {}", e)))?;

    for (index, sql) in statements.into_iter().enumerate() {
        let outcome = execute_in_savepoint(&mut tx, index, sql)?;
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    // A script may end the transaction itself (COMMIT/END/ROLLBACK)
    let committed = if tx.is_autocommit() {
        tracing::warn!("Script closed the transaction itself; skipping final commit");
        false
    } else {
        tx.commit()
            .map_err(|e| Error::database(format!("Failed to commit: {}", e)))?;
        true
    };

    let report = BatchReport {
        outcomes,
        committed,
        elapsed: batch_start.elapsed(),
    };

    tracing::info!(
        "Batch finished: {} statements, {} succeeded, {} failed",
        report.statement_count(),
        report.success_count(),
        report.failure_count()
    );

    Ok(report)
}

/// Execute one statement inside its own savepoint.
///
/// A failed attempt is rolled back to the savepoint, so a segment holding
/// several statements has no effect unless all of them succeed.
fn execute_in_savepoint(
    tx: &mut Transaction<'_>,
    index: usize,
    sql: String,
) -> Result<StatementOutcome> {
    let mut sp = tx
        .savepoint()
        .map_err(|e| Error::database(format!("Failed to create savepoint: {}", e)))?;

    let outcome = execute_statement(&sp, index, sql);

    if sp.is_autocommit() {
        // The statement ended the transaction; the savepoint is gone with it
        sp.set_drop_behavior(DropBehavior::Ignore);
    } else if outcome.is_failed() {
        sp.rollback().map_err(|e| {
            Error::database(format!("Failed to roll back statement {}: {}", index, e))
        })?;
        // Release the now-empty savepoint
        sp.commit()
            .map_err(|e| Error::database(format!("Failed to release savepoint: {}", e)))?;
    } else {
        sp.commit()
            .map_err(|e| Error::database(format!("Failed to release savepoint: {}", e)))?;
    }

    Ok(outcome)
}

/// Execute one statement and capture its outcome.
///
/// The text goes to SQLite as-is. Empty or comment-only text is a
/// successful no-op, and rows returned by a statement are discarded.
pub fn execute_statement(conn: &Connection, index: usize, sql: String) -> StatementOutcome {
    let start = Instant::now();
    let result = conn.execute_batch(&sql);
    let elapsed = start.elapsed();

    match result {
        Ok(()) => {
            tracing::debug!("Statement {} ok", index);
            StatementOutcome::success(index, sql, elapsed)
        }
        Err(e) => {
            tracing::warn!("Statement {} failed: {}", index, e);
            StatementOutcome::failed(index, sql, StatementError::from(&e), elapsed)
        }
    }
}
