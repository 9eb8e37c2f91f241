//! Operator-facing text for batch runs.

use spatial_init_db::{BatchReport, StatementOutcome};

/// Diagnostic block printed for a failed statement.
///
/// The statement text is reproduced verbatim so it can be found in the
/// script, followed by the driver's message.
pub fn failure_block(outcome: &StatementOutcome) -> String {
    let mut block = format!("\n\n\nQuery error:\n{}", outcome.sql);
    if let Some(ref error) = outcome.error {
        block.push('\n');
        block.push_str(&error.to_string());
    }
    block
}

/// One-line summary of a finished batch.
pub fn summary(report: &BatchReport) -> String {
    let mut line = format!(
        "{} statements: {} succeeded, {} failed",
        report.statement_count(),
        report.success_count(),
        report.failure_count()
    );
    if !report.committed {
        line.push_str(" (transaction ended by script, final commit skipped)");
    }
    line
}

/// Numbered statement listing used by dry runs.
pub fn statement_listing(statements: &[String]) -> String {
    let mut listing = String::new();
    for (i, sql) in statements.iter().enumerate() {
        listing.push_str(&format!("[{}] {}\n", i + 1, sql.trim()));
    }
    listing.push_str(&format!("{} statements", statements.len()));
    listing
}
