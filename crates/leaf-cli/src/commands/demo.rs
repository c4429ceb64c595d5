//! Demo command implementation.
//!
//! Walks through the main object operations in a scratch directory: create a
//! directory and two JSON files, find one of them recursively, list the
//! tree, then write and read back some text.

use super::common::open_root;
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};
use anyhow::{Context, Result, ensure};
use leaf_fs::{FsObject, LeafConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the scratch directory created inside the demo root.
pub const SCRATCH_DIR: &str = "leaf-demo";

/// Files of one directory.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DirectoryFiles {
    /// Directory name
    pub directory: String,
    /// Names of the files directly inside it
    pub files: Vec<String>,
}

/// Everything the demo observed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DemoReport {
    /// Scratch directory the demo ran in
    pub scratch: PathBuf,
    /// `KIND: path` lines of the `test` directory's children
    pub children: Vec<String>,
    /// `KIND: path` lines of every object below the scratch directory
    pub descendants: Vec<String>,
    /// Files per directory directly below the scratch directory
    pub files_by_directory: Vec<DirectoryFiles>,
    /// Text read back after the write
    pub content: String,
    /// Whether the scratch directory was left on disk
    pub kept: bool,
}

fn display_lines(iter: impl Iterator<Item = leaf_fs::Result<FsObject>>) -> Result<Vec<String>> {
    let mut lines = iter
        .map(|object| object.map(|object| object.to_string()))
        .collect::<leaf_fs::Result<Vec<_>>>()?;
    lines.sort();
    Ok(lines)
}

fn names(iter: impl Iterator<Item = leaf_fs::Result<FsObject>>) -> Result<Vec<String>> {
    let mut names = iter
        .map(|object| object.map(|object| object.name().to_string()))
        .collect::<leaf_fs::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

/// Runs the demo scenario below `dir`.
///
/// # Errors
///
/// Returns an error if `dir` does not exist, the scratch directory already
/// exists, or any step does not behave as expected.
pub fn run_scenario(dir: &Path, keep: bool, config: &LeafConfig) -> Result<DemoReport> {
    let root = open_root(dir, config)?;
    let scratch = root.add_child(SCRATCH_DIR)?;
    ensure!(
        scratch.is_virtual(),
        "{} already exists, remove it first",
        scratch.full_path().display()
    );

    let test = scratch.add_directory("test")?;
    debug!("Created {}", test);

    let first = test.add_file("first_file.json")?;
    test.add_file("second_file.json")?;

    let found = scratch
        .search_first(|object| object.name() == "first_file.json", true)?
        .context("recursive search missed first_file.json")?;
    ensure!(found == first, "recursive search returned {found}");

    let children = display_lines(test.children()?)?;
    let descendants = display_lines(scratch.descendants()?)?;

    let mut files_by_directory = Vec::new();
    for directory in scratch.directories()? {
        let directory = directory?;
        files_by_directory.push(DirectoryFiles {
            directory: directory.name().to_string(),
            files: names(directory.files()?)?,
        });
    }

    first.write_string("hello")?;
    let content = first.read_string()?;

    let report = DemoReport {
        scratch: scratch.full_path().to_path_buf(),
        children,
        descendants,
        files_by_directory,
        content,
        kept: keep,
    };

    if !keep {
        scratch.delete()?;
        debug!("Removed {}", report.scratch.display());
    }
    Ok(report)
}

/// Runs the demo command.
///
/// # Errors
///
/// Returns an error if the scenario fails.
pub fn run(
    dir: &Path,
    keep: bool,
    config: &LeafConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Running demo in {}", dir.display());

    let report = run_scenario(dir, keep, config)?;
    println!("{}", format_output(&report, output_format)?);

    Ok(ExitCode::SUCCESS)
}
