//! Path helpers for filesystem objects.
//!
//! Paths are handled lexically: nothing here touches the disk or resolves
//! symbolic links.
//!
//! # Examples
//!
//! ```
//! use leaf_fs::path::{extension_of, normalize};
//! use std::path::Path;
//!
//! assert_eq!(normalize("/srv/./data/../logs/"), Path::new("/srv/logs"));
//! assert_eq!(extension_of("archive.tar.gz"), "tar.gz");
//! assert_eq!(extension_of("readme"), "");
//! ```

use crate::error::{LeafError, Result};
use std::path::{Component, Path, PathBuf};

/// Lexically normalizes a path.
///
/// Drops `.` components and trailing separators and folds `..` into the
/// preceding component. A `..` at the root stays at the root.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::RootDir => result.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if result.file_name().is_some() {
                    result.pop();
                } else if !result.has_root() {
                    result.push("..");
                }
            }
            Component::Normal(part) => result.push(part),
        }
    }
    result
}

/// Returns the base name of `name_or_path`, i.e. its last normal component.
///
/// # Errors
///
/// Returns [`LeafError::InvalidPath`] when there is no base name, as with an
/// empty string, `.`, `..` or a bare root.
pub fn base_name(name_or_path: impl AsRef<Path>) -> Result<String> {
    let path = name_or_path.as_ref();
    match path.components().next_back() {
        Some(Component::Normal(part)) => Ok(part.to_string_lossy().into_owned()),
        _ => Err(LeafError::InvalidPath {
            path: path.to_path_buf(),
            reason: "has no base name".to_string(),
        }),
    }
}

/// Returns the dotted suffix chain of a base name.
///
/// Leading dots belong to the stem, so `.bashrc` has no extension while
/// `.config.toml` has `toml`. A name ending in a dot has no extension.
#[must_use]
pub fn extension_of(name: &str) -> String {
    if name.ends_with('.') {
        return String::new();
    }

    let mut parts = name.trim_start_matches('.').split('.');
    parts.next();
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}
