//! Spatial-init - initialize SpatiaLite databases from batch SQL scripts
//!
//! This library crate exposes configuration and output rendering for the
//! binary and for integration testing.

pub mod config;
pub mod output;
