use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use spatial_init_db::connection::DEFAULT_SPATIALITE_EXTENSION;
use spatial_init_db::script::DEFAULT_DELIMITER;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub script: ScriptConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Target database file (created if missing)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Load the SpatiaLite extension after opening
    #[serde(default)]
    pub spatialite: bool,

    /// Loadable module name or path for SpatiaLite
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    DEFAULT_SPATIALITE_EXTENSION.to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            spatialite: false,
            extension: default_extension(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScriptConfig {
    /// SQL script to execute
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub split: SplitStrategy,

    /// Statement delimiter for `split = "delimiter"` (one character)
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            path: None,
            split: SplitStrategy::default(),
            delimiter: default_delimiter(),
        }
    }
}

/// How statements are separated in the script.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Split on every occurrence of the delimiter character
    #[default]
    Delimiter,
    /// Split on `;` outside literals, comments and trigger bodies
    Sql,
}
