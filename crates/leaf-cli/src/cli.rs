//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use crate::actions::ConfigAction;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Leaf - declare files and directories lazily, then query and edit them.
#[derive(Parser, Debug)]
#[command(name = "leaf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Output format (json, text, pretty); defaults to the configured format
    #[arg(long = "format", global = true, value_parser = ["json", "text", "pretty"])]
    pub format: Option<String>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every object below a directory.
    ///
    /// Directories are listed before their contents.
    Tree {
        /// Directory to walk
        root: PathBuf,
    },

    /// Find objects by name or by `*.ext` pattern.
    ///
    /// # Examples
    ///
    /// ```bash
    /// leaf find . '*.json' --recursive
    /// leaf find /srv config.toml --first
    /// ```
    Find {
        /// Directory to search
        root: PathBuf,

        /// Exact name, or `*.ext` to match by extension
        pattern: String,

        /// Search the whole subtree instead of direct children only
        #[arg(short, long)]
        recursive: bool,

        /// Stop at the first match; exits with code 3 when nothing matches
        #[arg(long)]
        first: bool,
    },

    /// Print the content of a text file.
    Cat {
        /// File to read
        file: PathBuf,
    },

    /// Write text to a file below a root, creating directories as needed.
    Write {
        /// Existing directory the path is relative to
        root: PathBuf,

        /// Relative path of the file
        path: PathBuf,

        /// Text to write
        content: String,

        /// Append instead of replacing the content
        #[arg(short, long)]
        append: bool,
    },

    /// Remove a file or a directory tree below a root.
    Rm {
        /// Existing directory the path is relative to
        root: PathBuf,

        /// Relative path of the object to remove
        path: PathBuf,
    },

    /// Run a short walkthrough in a scratch directory.
    ///
    /// Creates `leaf-demo/` inside the given directory, exercises creation,
    /// search, listing and content I/O, and removes it again.
    Demo {
        /// Existing directory to run in
        dir: PathBuf,

        /// Leave the scratch directory on disk
        #[arg(long)]
        keep: bool,
    },

    /// Manage the CLI configuration file.
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}
