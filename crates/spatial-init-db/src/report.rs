//! Per-statement outcomes and the batch report.

use std::time::Duration;

use serde::Serialize;

/// Status of a single statement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementStatus {
    /// Statement executed successfully
    Success,
    /// Statement failed; its effects were discarded by SQLite
    Failed,
}

/// Error information for a failed statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementError {
    /// Driver error message, e.g. `no such table: bogus`
    pub message: String,
    /// SQLite extended result code, when the failure came from SQLite
    pub code: Option<i32>,
}

impl StatementError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }
}

impl From<&rusqlite::Error> for StatementError {
    fn from(err: &rusqlite::Error) -> Self {
        let error = Self::new(err.to_string());
        match err.sqlite_error() {
            Some(ffi) => error.with_code(ffi.extended_code),
            None => error,
        }
    }
}

impl std::fmt::Display for StatementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Outcome of one execution attempt.
#[derive(Debug, Clone, Serialize)]
pub struct StatementOutcome {
    /// Position of the statement in the script, 0-based
    pub index: usize,
    /// Statement text exactly as it was executed
    pub sql: String,
    pub status: StatementStatus,
    pub error: Option<StatementError>,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl StatementOutcome {
    pub fn success(index: usize, sql: String, elapsed: Duration) -> Self {
        Self {
            index,
            sql,
            status: StatementStatus::Success,
            error: None,
            elapsed,
        }
    }

    pub fn failed(index: usize, sql: String, error: StatementError, elapsed: Duration) -> Self {
        Self {
            index,
            sql,
            status: StatementStatus::Failed,
            error: Some(error),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StatementStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == StatementStatus::Failed
    }
}

/// Result of running a whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// One outcome per statement, in script order
    pub outcomes: Vec<StatementOutcome>,
    /// Whether the closing commit was issued
    pub committed: bool,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn statement_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(StatementOutcome::is_failed)
    }

    /// Failed outcomes, in script order.
    pub fn failures(&self) -> impl Iterator<Item = &StatementOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> BatchReport {
        BatchReport {
            outcomes: vec![
                StatementOutcome::success(0, "CREATE TABLE t(id INTEGER);".into(), Duration::ZERO),
                StatementOutcome::failed(
                    1,
                    "INSERT INTO bogus VALUES(1);".into(),
                    StatementError::new("no such table: bogus").with_code(1),
                    Duration::from_millis(3),
                ),
                StatementOutcome::success(2, "\n".into(), Duration::ZERO),
            ],
            committed: true,
            elapsed: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_counts() {
        let report = report();
        assert_eq!(report.statement_count(), 3);
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 1);
        assert!(report.has_failures());

        let failed: Vec<usize> = report.failures().map(|o| o.index).collect();
        assert_eq!(failed, vec![1]);
    }

    #[test]
    fn test_statement_error_display() {
        assert_eq!(
            StatementError::new("no such table: bogus").to_string(),
            "no such table: bogus"
        );
        assert_eq!(
            StatementError::new("no such table: bogus")
                .with_code(1)
                .to_string(),
            "no such table: bogus (code 1)"
        );
    }

    #[test]
    fn test_statement_error_from_sqlite_failure() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn
            .execute_batch("INSERT INTO bogus VALUES(1);")
            .unwrap_err();

        let statement_error = StatementError::from(&err);
        assert!(statement_error.message.contains("no such table: bogus"));
        assert!(statement_error.code.is_some());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["committed"], true);
        assert_eq!(json["elapsed_ms"], 12);
        assert_eq!(json["outcomes"][1]["status"], "failed");
        assert_eq!(json["outcomes"][1]["error"]["message"], "no such table: bogus");
        assert_eq!(json["outcomes"][1]["elapsed_ms"], 3);
        assert!(json["outcomes"][0]["error"].is_null());
    }
}
