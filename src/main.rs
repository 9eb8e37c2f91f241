mod cli;

use spatial_init::{config, output};
use spatial_init_db::{runner, script};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};

struct RunFlags {
    dry_run: bool,
    json: bool,
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "spatial_init=debug,spatial_init_db=debug".to_string()
        } else {
            "spatial_init=info,spatial_init_db=info".to_string()
        }
    });

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            database,
            script,
            split,
            delimiter,
            spatialite,
            extension,
            dry_run,
            json,
            strict,
        } => {
            let overrides = config::RunOverrides {
                database,
                script,
                split,
                delimiter,
                spatialite,
                extension,
            };
            let flags = RunFlags {
                dry_run,
                json,
                strict,
            };
            run_script(overrides, cli.config.as_deref(), flags)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("spatial-init {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_script(
    overrides: config::RunOverrides,
    config_path: Option<&std::path::Path>,
    flags: RunFlags,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let options = config::resolve_run_options(&config, overrides)?;

    if flags.dry_run {
        let text = script::read_script(&options.script_path)?;
        let statements = script::split_script(&text, options.split);
        println!("{}", output::statement_listing(&statements));
        println!("\n[DRY RUN] Database {:?} was not opened", options.database_path);
        return Ok(());
    }

    tracing::info!(
        "Running {:?} against {:?}",
        options.script_path,
        options.database_path
    );

    let report = runner::run_batch(&options, |outcome| {
        if outcome.is_failed() && !flags.json {
            println!("{}", output::failure_block(outcome));
        }
    })
    .with_context(|| format!("Run aborted, database {:?} not committed", options.database_path))?;

    if flags.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", output::summary(&report));
    }

    if flags.strict && report.has_failures() {
        anyhow::bail!(
            "{} of {} statements failed",
            report.failure_count(),
            report.statement_count()
        );
    }

    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&config::Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &config::Config) {
    let show = |p: &Option<std::path::PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    };

    println!("  Database: {}", show(&config.database.path));
    println!(
        "  SpatiaLite: {}",
        if config.database.spatialite {
            config.database.extension.as_str()
        } else {
            "disabled"
        }
    );
    println!("  Script: {}", show(&config.script.path));
    match config.script.split {
        config::SplitStrategy::Delimiter => {
            println!("  Split: delimiter {:?}", config.script.delimiter)
        }
        config::SplitStrategy::Sql => println!("  Split: sql"),
    }
}
