mod types;

pub use types::*;

use anyhow::{Context, Result};
use spatial_init_db::{RunOptions, SplitMode};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./spatial-init.toml", "~/.config/spatial-init/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.script.split == SplitStrategy::Delimiter {
        delimiter_char(&config.script.delimiter)?;
    }

    if config.database.spatialite && config.database.extension.trim().is_empty() {
        anyhow::bail!("SpatiaLite is enabled but no extension name is set");
    }

    Ok(())
}

fn delimiter_char(delimiter: &str) -> Result<char> {
    let mut chars = delimiter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => anyhow::bail!(
            "Delimiter must be exactly one character, got {:?}",
            delimiter
        ),
    }
}

/// Values given on the command line (or through their environment
/// variables). Anything set here wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub database: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub split: Option<SplitStrategy>,
    pub delimiter: Option<char>,
    pub spatialite: bool,
    pub extension: Option<String>,
}

/// Merge command-line overrides with the config file into run options.
pub fn resolve_run_options(config: &Config, overrides: RunOverrides) -> Result<RunOptions> {
    let database_path = overrides
        .database
        .or_else(|| config.database.path.clone())
        .context("No database path given (use --database, SPATIAL_INIT_DATABASE, or [database] path)")?;

    let script_path = overrides
        .script
        .or_else(|| config.script.path.clone())
        .context("No script path given (use --script, SPATIAL_INIT_SCRIPT, or [script] path)")?;

    let split = match overrides.split.unwrap_or(config.script.split) {
        SplitStrategy::Sql if overrides.delimiter.is_some() => {
            anyhow::bail!("--delimiter only applies to delimiter splitting, not --split sql")
        }
        SplitStrategy::Sql => SplitMode::Sql,
        SplitStrategy::Delimiter => {
            let delimiter = match overrides.delimiter {
                Some(c) => c,
                None => delimiter_char(&config.script.delimiter)?,
            };
            SplitMode::Delimiter(delimiter)
        }
    };

    // An explicit extension implies loading it
    let extension = match overrides.extension {
        Some(name) => Some(name),
        None if overrides.spatialite || config.database.spatialite => {
            Some(config.database.extension.clone())
        }
        None => None,
    };

    Ok(RunOptions {
        database_path,
        script_path,
        split,
        extension,
    })
}
