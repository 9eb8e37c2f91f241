use clap::{Parser, Subcommand};
use spatial_init::config::SplitStrategy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spatial-init")]
#[command(author, version, about = "Initialize a spatial database from a batch SQL script")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a SQL script against a database file
    Run {
        /// Target database file (created if missing)
        #[arg(short, long, env = "SPATIAL_INIT_DATABASE")]
        database: Option<PathBuf>,

        /// SQL script to execute
        #[arg(short, long, env = "SPATIAL_INIT_SCRIPT")]
        script: Option<PathBuf>,

        /// How statements are separated in the script
        #[arg(long, value_enum)]
        split: Option<SplitStrategy>,

        /// Statement delimiter character for delimiter splitting
        #[arg(long)]
        delimiter: Option<char>,

        /// Load the SpatiaLite extension after opening the database
        #[arg(long)]
        spatialite: bool,

        /// Loadable extension to use instead of the configured one
        #[arg(long)]
        extension: Option<String>,

        /// List the statements without touching the database
        #[arg(long)]
        dry_run: bool,

        /// Output the batch report as JSON
        #[arg(long)]
        json: bool,

        /// Exit with an error if any statement failed
        #[arg(long)]
        strict: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
