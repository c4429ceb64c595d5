//! Storage backends for filesystem objects.
//!
//! Every disk access made by [`FsObject`](crate::FsObject) goes through the
//! [`Backend`] trait, so the same object model can run against:
//!
//! - [`LocalBackend`]: the real filesystem via `std::fs`
//! - [`MemoryBackend`]: an in-memory tree for fast, deterministic tests
//!
//! All paths handed to a backend are absolute and lexically normalized.

mod local;
mod memory;

pub use local::LocalBackend;
pub use memory::MemoryBackend;

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::Path;

/// Kind of a physically present entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// Lazily produced names of the entries inside a directory.
pub type DirNames = Box<dyn Iterator<Item = io::Result<OsString>> + Send>;

/// Narrow interface over the storage that backs filesystem objects.
///
/// Implementations report failures as plain `io::Error`s; the object layer
/// maps them onto [`LeafError`](crate::LeafError) variants by kind.
pub trait Backend: Send + Sync + fmt::Debug {
    /// Returns the kind of the entry at `path`, or `None` if nothing is there.
    fn entry_kind(&self, path: &Path) -> Option<EntryKind>;

    /// Creates a single directory. The parent must already exist.
    ///
    /// Fails with `AlreadyExists` if any entry occupies `path`.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Reads the whole content of a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Writes a file, creating it or truncating existing content.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Appends to a file, creating it if needed.
    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Lists the names of the entries in a directory, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<DirNames>;

    /// Removes a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes a directory and everything below it.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Returns the size of a file in bytes.
    fn file_len(&self, path: &Path) -> io::Result<u64>;

    /// Returns `true` if any entry exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        self.entry_kind(path).is_some()
    }
}
