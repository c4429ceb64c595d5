//! Remove command implementation.

use super::common::{EntryInfo, locate, open_root};
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};
use anyhow::Result;
use leaf_fs::LeafConfig;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Result of the remove command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RemoveReport {
    /// The removed object as it was before removal
    pub removed: EntryInfo,
}

/// Removes the object at `relative` below `root`.
///
/// Directories are removed with everything in them.
///
/// # Errors
///
/// Returns [`LeafError::NotFound`](leaf_fs::LeafError::NotFound) if the
/// object does not exist, or the backend error if removal fails.
pub fn remove(root: &Path, relative: &Path, config: &LeafConfig) -> Result<RemoveReport> {
    let root = open_root(root, config)?;
    let object = locate(&root, relative)?;
    let removed = EntryInfo::of(&object)?;

    object.delete()?;
    Ok(RemoveReport { removed })
}

/// Runs the remove command.
///
/// # Errors
///
/// Returns an error if the object cannot be found or removed.
pub fn run(
    root: &Path,
    relative: &Path,
    config: &LeafConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Removing {} below {}", relative.display(), root.display());

    let report = remove(root, relative, config)?;
    println!("{}", format_output(&report, output_format)?);

    Ok(ExitCode::SUCCESS)
}
