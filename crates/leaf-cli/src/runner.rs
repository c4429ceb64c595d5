//! Command execution and logging initialization.

use crate::cli::{Cli, Commands};
use crate::commands;
use crate::commands::config::Config;
use crate::commands::find::FindOptions;
use crate::types::{ExitCode, OutputFormat};
use anyhow::Result;
use clap::CommandFactory;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes logging on stderr.
///
/// `--verbose` forces the `debug` level. Otherwise `RUST_LOG` wins over the
/// configured `log_level`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool, json: bool, log_level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .try_init()?;

    Ok(())
}

/// Picks the output format: the `--format` flag, else the configured default.
///
/// # Errors
///
/// Returns an error if the chosen format is unknown.
pub fn output_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    flag.map_or_else(|| config.default_format(), str::parse)
}

/// Executes the specified CLI command.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn execute_command(
    command: Commands,
    config: &Config,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let leaf_config = config.leaf_config();

    match command {
        Commands::Tree { root } => commands::tree::run(&root, &leaf_config, output_format),
        Commands::Find {
            root,
            pattern,
            recursive,
            first,
        } => {
            let options = FindOptions {
                pattern,
                recursive,
                first,
            };
            commands::find::run(&root, &options, &leaf_config, output_format)
        }
        Commands::Cat { file } => commands::cat::run(&file, &leaf_config, output_format),
        Commands::Write {
            root,
            path,
            content,
            append,
        } => commands::write::run(&root, &path, &content, append, &leaf_config, output_format),
        Commands::Rm { root, path } => commands::rm::run(&root, &path, &leaf_config, output_format),
        Commands::Demo { dir, keep } => commands::demo::run(&dir, keep, &leaf_config, output_format),
        Commands::Config { action } => commands::config::run(&action, output_format),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
