//! Action type definitions for CLI commands.

use clap::Subcommand;

/// Configuration actions.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file if none exists
    Init,

    /// Show a single value, e.g. `fs.json_format`
    Get {
        /// Dotted key
        key: String,
    },
}
