//! Real filesystem backend.

use super::{Backend, DirNames, EntryKind};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Backend that operates directly on the local filesystem.
///
/// Entry kinds follow symbolic links, so a link to a directory reports
/// [`EntryKind::Directory`].
///
/// # Examples
///
/// ```
/// use leaf_fs::backend::{Backend, EntryKind, LocalBackend};
///
/// let temp = tempfile::tempdir().unwrap();
/// let backend = LocalBackend::new();
///
/// assert_eq!(backend.entry_kind(temp.path()), Some(EntryKind::Directory));
/// assert!(!backend.exists(&temp.path().join("missing")));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackend;

impl LocalBackend {
    /// Creates a new local backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Backend for LocalBackend {
    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        let metadata = fs::metadata(path).ok()?;
        if metadata.is_dir() {
            Some(EntryKind::Directory)
        } else if metadata.is_file() {
            Some(EntryKind::File)
        } else {
            None
        }
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }

    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        file.write_all(data)
    }

    fn read_dir(&self, path: &Path) -> io::Result<DirNames> {
        let entries = fs::read_dir(path)?;
        Ok(Box::new(
            entries.map(|entry| entry.map(|entry| entry.file_name())),
        ))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn file_len(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }
}
