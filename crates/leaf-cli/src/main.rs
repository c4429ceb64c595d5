//! Leaf CLI.
//!
//! Command-line access to lazily materialized filesystem objects.
//!
//! # Examples
//!
//! ```bash
//! # Print everything below a directory
//! leaf tree ./project
//!
//! # Find JSON files anywhere below it
//! leaf find ./project '*.json' --recursive
//!
//! # Write a file, creating the directories on the way
//! leaf write ./project notes/today.txt "hello"
//! ```

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use leaf_cli::cli::Cli;
use leaf_cli::commands::config::load_config;
use leaf_cli::runner::{execute_command, init_logging, output_format};
use leaf_cli::types::ExitCode;

fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::for_error(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config()?;
    init_logging(cli.verbose, cli.log_json, &config.general.log_level)?;

    let format = output_format(cli.format.as_deref(), &config)?;
    execute_command(cli.command, &config, format)
}
