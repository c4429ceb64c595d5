//! Find command implementation.
//!
//! Searches below a root by exact name or by `*.ext` pattern.

use super::common::{EntryInfo, NamePattern, open_root};
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};
use anyhow::Result;
use leaf_fs::LeafConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options of the find command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    /// Name or `*.ext` pattern
    pub pattern: String,
    /// Search the whole subtree instead of direct children only
    pub recursive: bool,
    /// Stop at the first match
    pub first: bool,
}

/// Result of the find command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FindReport {
    /// Root the search started from
    pub root: PathBuf,
    /// Pattern as given
    pub pattern: String,
    /// Whether the subtree was searched
    pub recursive: bool,
    /// Matching objects in pre-order
    pub matches: Vec<EntryInfo>,
}

/// Runs the search and collects the matches.
///
/// # Errors
///
/// Returns an error if the root cannot be opened or listed.
pub fn search(root: &Path, options: &FindOptions, config: &LeafConfig) -> Result<FindReport> {
    let root = open_root(root, config)?;
    let pattern = NamePattern::parse(&options.pattern);
    debug!("Parsed pattern {:?}", pattern);

    let matches = if options.first {
        root.search_first(|object| pattern.matches(object), options.recursive)?
            .map(|object| EntryInfo::of(&object))
            .transpose()?
            .into_iter()
            .collect()
    } else {
        root.search(|object| pattern.matches(object), options.recursive)?
            .map(|object| EntryInfo::of(&object?))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(FindReport {
        root: root.full_path().to_path_buf(),
        pattern: options.pattern.clone(),
        recursive: options.recursive,
        matches,
    })
}

/// Runs the find command.
///
/// Exits with [`ExitCode::NOT_FOUND`] when `--first` finds nothing.
///
/// # Errors
///
/// Returns an error if the search fails or the output cannot be formatted.
pub fn run(
    root: &Path,
    options: &FindOptions,
    config: &LeafConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Searching {} for '{}'", root.display(), options.pattern);

    let report = search(root, options, config)?;
    println!("{}", format_output(&report, output_format)?);

    if options.first && report.matches.is_empty() {
        return Ok(ExitCode::NOT_FOUND);
    }
    Ok(ExitCode::SUCCESS)
}
