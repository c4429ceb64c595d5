//! Cat command implementation.

use super::common::open_root;
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};
use anyhow::Result;
use leaf_fs::LeafConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// File content as reported in JSON mode.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileContent {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Text content
    pub content: String,
}

/// Reads a file as text.
///
/// # Errors
///
/// Returns an error if the file does not exist, is a directory or is not
/// valid UTF-8.
pub fn read(path: &Path, config: &LeafConfig) -> Result<FileContent> {
    let file = open_root(path, config)?;
    Ok(FileContent {
        content: file.read_string()?,
        path: file.full_path().to_path_buf(),
    })
}

/// Runs the cat command.
///
/// Text and pretty modes print the raw content; JSON mode wraps it with the
/// path.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn run(path: &Path, config: &LeafConfig, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Reading {}", path.display());

    let file = read(path, config)?;
    match output_format {
        OutputFormat::Json => println!("{}", format_output(&file, output_format)?),
        OutputFormat::Text | OutputFormat::Pretty => print!("{}", file.content),
    }

    Ok(ExitCode::SUCCESS)
}
