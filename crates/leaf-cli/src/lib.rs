//! Leaf CLI library.
//!
//! Exposes the argument definitions, commands and formatters of the `leaf`
//! binary so they can be tested.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)] // every command returns Result<ExitCode>

pub mod actions;
pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;
pub mod types;

pub use actions::ConfigAction;
pub use types::{ExitCode, OutputFormat};
