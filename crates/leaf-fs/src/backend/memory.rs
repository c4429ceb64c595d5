//! In-memory backend.
//!
//! Used for tests. All data is lost when the backend is dropped.

use super::{Backend, DirNames, EntryKind};
use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
enum Entry {
    File(Vec<u8>),
    Directory,
}

/// In-memory filesystem tree keyed by absolute path.
///
/// The root directory `/` always exists. Like a real filesystem, creating an
/// entry requires its parent directory to exist.
///
/// # Examples
///
/// ```
/// use leaf_fs::backend::{Backend, EntryKind, MemoryBackend};
/// use std::path::Path;
///
/// let backend = MemoryBackend::new();
/// backend.create_dir_all("/srv/data").unwrap();
/// backend.write(Path::new("/srv/data/a.txt"), b"hello").unwrap();
///
/// assert_eq!(backend.entry_kind(Path::new("/srv")), Some(EntryKind::Directory));
/// assert_eq!(backend.read(Path::new("/srv/data/a.txt")).unwrap(), b"hello");
/// ```
#[derive(Debug)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<PathBuf, Entry>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Creates a backend holding only the root directory.
    #[must_use]
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(PathBuf::from("/"), Entry::Directory);
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Creates a directory and all of its missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if a file sits anywhere along the path.
    pub fn create_dir_all(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let mut entries = self.write_lock();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            match entries.get(&current) {
                Some(Entry::Directory) => {}
                Some(Entry::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("file exists: {}", current.display()),
                    ));
                }
                None => {
                    entries.insert(current.clone(), Entry::Directory);
                }
            }
        }
        Ok(())
    }

    /// Returns the number of entries, including the root directory.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.read_lock().len()
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("not found: {}", path.display()),
    )
}

fn is_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::IsADirectory,
        format!("is a directory: {}", path.display()),
    )
}

fn not_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotADirectory,
        format!("not a directory: {}", path.display()),
    )
}

/// Checks that the parent of `path` exists and is a directory.
fn check_parent(entries: &HashMap<PathBuf, Entry>, path: &Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    match entries.get(parent) {
        Some(Entry::Directory) => Ok(()),
        Some(Entry::File(_)) => Err(not_a_directory(parent)),
        None => Err(not_found(parent)),
    }
}

impl Backend for MemoryBackend {
    fn entry_kind(&self, path: &Path) -> Option<EntryKind> {
        match self.read_lock().get(path)? {
            Entry::File(_) => Some(EntryKind::File),
            Entry::Directory => Some(EntryKind::Directory),
        }
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.write_lock();
        if entries.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("already exists: {}", path.display()),
            ));
        }
        check_parent(&entries, path)?;
        entries.insert(path.to_path_buf(), Entry::Directory);
        Ok(())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.read_lock().get(path) {
            Some(Entry::File(data)) => Ok(data.clone()),
            Some(Entry::Directory) => Err(is_a_directory(path)),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut entries = self.write_lock();
        if let Some(Entry::Directory) = entries.get(path) {
            return Err(is_a_directory(path));
        }
        check_parent(&entries, path)?;
        entries.insert(path.to_path_buf(), Entry::File(data.to_vec()));
        Ok(())
    }

    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut entries = self.write_lock();
        match entries.get_mut(path) {
            Some(Entry::File(existing)) => {
                existing.extend_from_slice(data);
                Ok(())
            }
            Some(Entry::Directory) => Err(is_a_directory(path)),
            None => {
                check_parent(&entries, path)?;
                entries.insert(path.to_path_buf(), Entry::File(data.to_vec()));
                Ok(())
            }
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<DirNames> {
        let entries = self.read_lock();
        match entries.get(path) {
            Some(Entry::Directory) => {}
            Some(Entry::File(_)) => return Err(not_a_directory(path)),
            None => return Err(not_found(path)),
        }

        let mut names: Vec<OsString> = entries
            .keys()
            .filter(|candidate| candidate.parent() == Some(path))
            .filter_map(|candidate| candidate.file_name().map(ToOwned::to_owned))
            .collect();
        names.sort();

        Ok(Box::new(names.into_iter().map(Ok)))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.write_lock();
        match entries.get(path) {
            Some(Entry::File(_)) => {
                entries.remove(path);
                Ok(())
            }
            Some(Entry::Directory) => Err(is_a_directory(path)),
            None => Err(not_found(path)),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut entries = self.write_lock();
        match entries.get(path) {
            Some(Entry::Directory) => {}
            Some(Entry::File(_)) => return Err(not_a_directory(path)),
            None => return Err(not_found(path)),
        }
        if path.parent().is_none() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "cannot remove root directory",
            ));
        }

        entries.retain(|candidate, _| !candidate.starts_with(path));
        Ok(())
    }

    fn file_len(&self, path: &Path) -> io::Result<u64> {
        match self.read_lock().get(path) {
            Some(Entry::File(data)) => Ok(data.len() as u64),
            Some(Entry::Directory) => Err(is_a_directory(path)),
            None => Err(not_found(path)),
        }
    }
}
