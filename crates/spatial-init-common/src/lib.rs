//! Spatial-Init-Common: shared error handling for spatial-init.
//!
//! # Examples
//!
//! ```
//! use spatial_init_common::{Error, Result};
//!
//! fn example() -> Result<()> {
//!     Err(Error::database("unable to open database file"))
//! }
//!
//! assert!(example().is_err());
//! ```

pub mod error;

pub use error::{Error, Result};
