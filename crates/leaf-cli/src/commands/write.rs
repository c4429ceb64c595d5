//! Write command implementation.
//!
//! Declares the chain of objects down to a file and writes it, creating
//! intermediate directories on the way.

use super::common::{EntryInfo, declare_chain, open_root};
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};
use anyhow::Result;
use leaf_fs::LeafConfig;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Result of the write command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WriteReport {
    /// The written file after the write
    pub file: EntryInfo,
    /// Whether the content was appended
    pub appended: bool,
}

/// Writes `content` to `relative` below `root`.
///
/// # Errors
///
/// Returns an error if the path is invalid, crosses a file or points at a
/// directory.
pub fn write(
    root: &Path,
    relative: &Path,
    content: &str,
    append: bool,
    config: &LeafConfig,
) -> Result<WriteReport> {
    let root = open_root(root, config)?;
    let file = declare_chain(&root, relative)?;

    if append {
        file.append_string(content)?;
    } else {
        file.write_string(content)?;
    }

    Ok(WriteReport {
        file: EntryInfo::of(&file)?,
        appended: append,
    })
}

/// Runs the write command.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn run(
    root: &Path,
    relative: &Path,
    content: &str,
    append: bool,
    config: &LeafConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Writing {} below {}", relative.display(), root.display());

    let report = write(root, relative, content, append, config)?;
    println!("{}", format_output(&report, output_format)?);

    Ok(ExitCode::SUCCESS)
}
