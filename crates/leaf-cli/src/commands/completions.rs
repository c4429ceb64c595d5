//! Shell completion generation command.

use crate::types::ExitCode;
use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Errors
///
/// Never fails; returns `Result` like every other command.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}
