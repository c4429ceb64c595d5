//! Command implementations for the leaf CLI.
//!
//! Each command module opens its objects, runs the operation and formats a
//! report according to the requested output format.

pub mod cat;
pub mod common;
pub mod completions;
pub mod config;
pub mod demo;
pub mod find;
pub mod rm;
pub mod tree;
pub mod write;
