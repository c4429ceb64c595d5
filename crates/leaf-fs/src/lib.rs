//! Lazily materialized filesystem objects.
//!
//! An [`FsObject`] is a handle to a path that may or may not exist yet.
//! Children are declared in memory and created on disk only when content is
//! written or when they gain children of their own. Every object can be
//! listed, searched with predicates, read and written as text, bytes or
//! JSON, and deleted.
//!
//! Disk access goes through the [`backend::Backend`] trait, with a
//! [`backend::LocalBackend`] for the real filesystem and a
//! [`backend::MemoryBackend`] for tests.
//!
//! # Examples
//!
//! ```
//! use leaf_fs::FsObject;
//! use serde_json::json;
//!
//! # fn main() -> leaf_fs::Result<()> {
//! let temp = tempfile::tempdir().unwrap();
//! let root = FsObject::new_root(temp.path())?;
//!
//! let test = root.add_directory("test")?;
//! test.add_file("a.json")?.write_json(&json!({"id": 1}))?;
//!
//! let hit = root.search_first(|object| object.name() == "a.json", true)?;
//! assert_eq!(hit.unwrap().read_value()?["id"], 1);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod backend;
pub mod builder;
pub mod config;
pub mod error;
pub mod object;
pub mod path;
pub mod traversal;

pub use builder::RootBuilder;
pub use config::{JsonFormat, LeafConfig, LeafConfigBuilder};
pub use error::{ErrorCode, LeafError, Result};
pub use object::{FsObject, ObjectKind};
pub use traversal::{Children, Descendants, ObjectFilter, Search};
