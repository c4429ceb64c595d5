//! Tree command implementation.
//!
//! Lists every object below a root, each directory before its contents.

use super::common::{EntryInfo, open_root};
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};
use anyhow::{Context, Result};
use leaf_fs::LeafConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of the tree command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TreeReport {
    /// Root the walk started from
    pub root: PathBuf,
    /// Number of objects found
    pub count: usize,
    /// Objects in pre-order
    pub entries: Vec<EntryInfo>,
}

/// Walks `root` and collects every descendant.
///
/// # Errors
///
/// Returns an error if the root cannot be opened or a directory cannot be
/// listed.
pub fn collect(root: &Path, config: &LeafConfig) -> Result<TreeReport> {
    let root = open_root(root, config)?;
    let entries = root
        .descendants()?
        .map(|object| EntryInfo::of(&object?))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("failed to walk {}", root.full_path().display()))?;

    Ok(TreeReport {
        root: root.full_path().to_path_buf(),
        count: entries.len(),
        entries,
    })
}

/// Runs the tree command.
///
/// # Errors
///
/// Returns an error if the walk fails or the output cannot be formatted.
pub fn run(root: &Path, config: &LeafConfig, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Listing tree below {}", root.display());

    let report = collect(root, config)?;
    println!("{}", format_output(&report, output_format)?);

    Ok(ExitCode::SUCCESS)
}
