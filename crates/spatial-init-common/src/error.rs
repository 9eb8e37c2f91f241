//! Common error types used throughout spatial-init.
//!
//! These cover the setup failures that abort a run: an unreadable script,
//! a database that cannot be opened or committed, and a spatial extension
//! that fails to load. Per-statement failures are not errors at this level;
//! they are recorded in the batch report instead.

use std::path::PathBuf;

/// Common error type for spatial-init.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// The script file could not be read.
    #[error("Failed to read script {}: {source}", path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A loadable extension (SpatiaLite) could not be loaded.
    #[error("Extension error: {0}")]
    Extension(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new Script error for the given path.
    pub fn script<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Script {
            path: path.into(),
            source,
        }
    }

    /// Create a new Extension error.
    pub fn extension<S: Into<String>>(msg: S) -> Self {
        Self::Extension(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::database("unable to open database file");
        assert_eq!(
            err.to_string(),
            "Database error: unable to open database file"
        );

        let err = Error::extension("mod_spatialite: cannot open shared object file");
        assert_eq!(
            err.to_string(),
            "Extension error: mod_spatialite: cannot open shared object file"
        );

        let err = Error::invalid_input("delimiter must be a single character");
        assert_eq!(
            err.to_string(),
            "Invalid input: delimiter must be a single character"
        );
    }

    #[test]
    fn test_script_error_includes_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = Error::script("/tmp/missing.sql", io_err);
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.sql"));
        assert!(msg.contains("No such file"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(Error::database("x"), Error::Database(_)));
        assert!(matches!(Error::extension("x"), Error::Extension(_)));
        assert!(matches!(Error::invalid_input("x"), Error::InvalidInput(_)));
    }
}
