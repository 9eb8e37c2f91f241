//! Spatial-Init-DB: batch execution of SQL scripts against SQLite/SpatiaLite.
//!
//! # Modules
//!
//! - `connection` - Opening and closing the database, loading SpatiaLite
//! - `script` - Reading scripts and splitting them into statements
//! - `runner` - Executing a batch with per-statement failure isolation
//! - `report` - Per-statement outcomes and the batch report
//!
//! # Example
//!
//! ```no_run
//! use spatial_init_db::runner::{run_batch, RunOptions};
//!
//! let options = RunOptions::new("network.sqlite", "create-empty-network.sql")
//!     .with_extension("mod_spatialite");
//! let report = run_batch(&options, |_| {}).unwrap();
//! println!("{} statements failed", report.failure_count());
//! ```

pub mod connection;
pub mod report;
pub mod runner;
pub mod script;

pub use report::{BatchReport, StatementError, StatementOutcome, StatementStatus};
pub use runner::{run_batch, run_statements, RunOptions};
pub use script::{split_script, SplitMode};
