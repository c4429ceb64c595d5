//! Utilities shared across CLI commands.

use anyhow::{Context, Result};
use leaf_fs::{FsObject, LeafConfig, LeafError, ObjectKind, RootBuilder};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Opens `path` as a root object, resolving it against the working
/// directory first when it is relative.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined or the
/// path does not exist.
pub fn open_root(path: &Path, config: &LeafConfig) -> Result<FsObject> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("failed to resolve {}", path.display()))?;
    let root = RootBuilder::new(&absolute).config(config.clone()).build()?;
    Ok(root)
}

/// Splits a relative path into plain names.
///
/// # Errors
///
/// Returns [`LeafError::InvalidPath`] for absolute paths, `..` components or
/// an empty path.
pub fn relative_names(relative: &Path) -> Result<Vec<String>, LeafError> {
    let invalid = |reason: &str| LeafError::InvalidPath {
        path: relative.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut names = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => names.push(
                part.to_str()
                    .ok_or_else(|| invalid("must be valid UTF-8"))?
                    .to_string(),
            ),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("must not contain '..'")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("must be relative to the root"));
            }
        }
    }

    if names.is_empty() {
        return Err(invalid("must name at least one entry"));
    }
    Ok(names)
}

/// Declares the chain of objects leading to `relative` below `root`.
///
/// Intermediate objects become directories on disk as soon as their child
/// is declared. The last object is returned as is, virtual if it does not
/// exist yet.
///
/// # Errors
///
/// Returns an error if the path is invalid or an intermediate entry is a
/// file.
pub fn declare_chain(root: &FsObject, relative: &Path) -> Result<FsObject> {
    let mut current = root.clone();
    for name in relative_names(relative)? {
        current = current.add_child(name)?;
    }
    Ok(current)
}

/// Finds the existing object at `relative` below `root` without creating
/// anything.
///
/// # Errors
///
/// Returns [`LeafError::NotFound`] if any step of the path is missing.
pub fn locate(root: &FsObject, relative: &Path) -> Result<FsObject> {
    let mut current = root.clone();
    for name in relative_names(relative)? {
        let next = current.search_first(|object| object.name() == name, false)?;
        current = next.ok_or_else(|| LeafError::NotFound {
            path: current.full_path().join(&name),
        })?;
    }
    Ok(current)
}

/// Serializable summary of one object.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntryInfo {
    /// Object kind at the time of the listing
    pub kind: ObjectKind,
    /// Absolute path
    pub path: PathBuf,
    /// Size in bytes, 0 for anything but files
    pub size: u64,
}

impl EntryInfo {
    /// Captures the current state of `object`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file size cannot be read.
    pub fn of(object: &FsObject) -> Result<Self> {
        Ok(Self {
            kind: object.kind(),
            path: object.full_path().to_path_buf(),
            size: object.size()?,
        })
    }
}

/// Name pattern accepted by `find`.
///
/// `*.ext` matches by extension, anything else matches the exact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    /// Exact base name
    Exact(String),
    /// Extension chain, without the leading dot
    Extension(String),
}

impl NamePattern {
    /// Parses a pattern.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        pattern.strip_prefix("*.").map_or_else(
            || Self::Exact(pattern.to_string()),
            |extension| Self::Extension(extension.to_string()),
        )
    }

    /// Returns `true` if `object` matches the pattern.
    #[must_use]
    pub fn matches(&self, object: &FsObject) -> bool {
        match self {
            Self::Exact(name) => object.name() == name,
            Self::Extension(extension) => {
                object.extension() == extension
                    || object.extension().ends_with(&format!(".{extension}"))
            }
        }
    }
}
