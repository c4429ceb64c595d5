//! Filesystem objects with lazy materialization.
//!
//! An [`FsObject`] stands for a file or directory that may not exist yet.
//! Objects are created in memory with [`FsObject::add_child`] and only turn
//! into real entries when something needs them on disk: a write creates the
//! file, and adding a child to a virtual object creates its directory.
//!
//! # Lifecycle
//!
//! ```text
//!            add_child                write_* / add_file
//!  parent ─────────────► VIRTUAL ─────────────────────────► FILE
//!                          │
//!                          │ add_child on it / add_directory
//!                          ▼
//!                      DIRECTORY
//! ```
//!
//! A virtual object is registered as a pending child of its parent until it
//! is materialized. Registrations belong to the tree opened by a root, not to
//! individual handles, so dropping a handle never loses one. Deleting an
//! object detaches it and removes whatever is on disk.
//!
//! # Examples
//!
//! ```
//! use leaf_fs::{FsObject, ObjectKind};
//!
//! # fn main() -> leaf_fs::Result<()> {
//! let temp = tempfile::tempdir().unwrap();
//! let root = FsObject::new_root(temp.path())?;
//!
//! // Described in memory only
//! let config = root.add_child("config")?;
//! assert_eq!(config.kind(), ObjectKind::Virtual);
//! assert!(!temp.path().join("config").exists());
//!
//! // Adding a child creates the directory on demand
//! let settings = config.add_child("settings.json")?;
//! assert_eq!(config.kind(), ObjectKind::Directory);
//!
//! // Writing creates the file
//! settings.write_string("{}")?;
//! assert!(temp.path().join("config/settings.json").is_file());
//! # Ok(())
//! # }
//! ```

use crate::backend::{Backend, EntryKind};
use crate::builder::RootBuilder;
use crate::config::{JsonFormat, LeafConfig};
use crate::error::{LeafError, Result};
use crate::path::{base_name, extension_of, normalize};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// State of an object, derived from the backend on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    /// Nothing exists at the path yet
    Virtual,
    /// A regular file exists at the path
    File,
    /// A directory exists at the path
    Directory,
}

impl ObjectKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Virtual => "VIRTUAL",
            Self::File => "FILE",
            Self::Directory => "DIRECTORY",
        }
    }
}

impl From<Option<EntryKind>> for ObjectKind {
    fn from(entry: Option<EntryKind>) -> Self {
        match entry {
            Some(EntryKind::File) => Self::File,
            Some(EntryKind::Directory) => Self::Directory,
            None => Self::Virtual,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pending child names keyed by the path of their parent directory.
type PendingRegistry = HashMap<PathBuf, BTreeSet<String>>;

/// State shared by every handle opened below one root.
#[derive(Debug)]
struct Tree {
    root: PathBuf,
    backend: Arc<dyn Backend>,
    config: Arc<LeafConfig>,
    pending: Mutex<PendingRegistry>,
}

#[derive(Debug)]
struct Node {
    name: String,
    extension: String,
    full_path: PathBuf,
    tree: Arc<Tree>,
}

/// Handle to a file or directory that may or may not exist on disk.
///
/// A handle is a path into the tree opened by its root. Pending children
/// are recorded in that tree, keyed by path, so every handle for a
/// directory sees the same pending set and dropping handles loses nothing.
/// Handles are cheap to clone. Two handles are equal, and hash the same,
/// when their full paths are equal, no matter how they were obtained.
#[derive(Clone)]
pub struct FsObject {
    node: Arc<Node>,
}

impl FsObject {
    /// Opens an existing directory or file on the local filesystem as a root.
    ///
    /// Uses [`LeafConfig::default`]. See [`RootBuilder`] for other backends
    /// and settings.
    ///
    /// # Errors
    ///
    /// Returns [`LeafError::InvalidPath`] if `path` is relative or does not
    /// exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use leaf_fs::FsObject;
    ///
    /// let temp = tempfile::tempdir().unwrap();
    /// let root = FsObject::new_root(temp.path()).unwrap();
    /// assert!(root.is_directory());
    ///
    /// assert!(FsObject::new_root("relative/path").unwrap_err().is_invalid_path());
    /// ```
    pub fn new_root(path: impl AsRef<Path>) -> Result<Self> {
        RootBuilder::new(path).build()
    }

    pub(crate) fn root(
        path: &Path,
        backend: Arc<dyn Backend>,
        config: Arc<LeafConfig>,
    ) -> Result<Self> {
        if !path.is_absolute() {
            return Err(LeafError::InvalidPath {
                path: path.to_path_buf(),
                reason: "must be an absolute path".to_string(),
            });
        }

        let full_path = normalize(path);
        if !backend.exists(&full_path) {
            return Err(LeafError::InvalidPath {
                path: path.to_path_buf(),
                reason: "root must exist".to_string(),
            });
        }

        let name = full_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Opened root {}", full_path.display());

        let tree = Arc::new(Tree {
            root: full_path.clone(),
            backend,
            config,
            pending: Mutex::new(HashMap::new()),
        });
        Ok(Self::at(name, full_path, tree))
    }

    fn at(name: String, full_path: PathBuf, tree: Arc<Tree>) -> Self {
        let extension = extension_of(&name);
        Self {
            node: Arc::new(Node {
                name,
                extension,
                full_path,
                tree,
            }),
        }
    }

    /// Builds a child handle named `name` without registering it anywhere.
    pub(crate) fn child_named(&self, name: String) -> Self {
        let full_path = self.node.full_path.join(&name);
        Self::at(name, full_path, Arc::clone(&self.node.tree))
    }

    /// Base name of the object.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Dotted suffix chain of the name, e.g. `tar.gz` for `archive.tar.gz`.
    ///
    /// Empty when the name has no suffix.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.node.extension
    }

    /// Absolute, normalized path of the object.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.node.full_path
    }

    /// Returns the parent object, or `None` for a root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let parent_path = self.full_path().parent()?;
        let name = parent_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Some(Self::at(
            name,
            parent_path.to_path_buf(),
            Arc::clone(&self.node.tree),
        ))
    }

    /// Returns `true` if this object was built as a root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.node.full_path == self.node.tree.root
    }

    /// Configuration shared by the tree this object belongs to.
    #[must_use]
    pub fn config(&self) -> &LeafConfig {
        &self.node.tree.config
    }

    pub(crate) fn backend(&self) -> &dyn Backend {
        self.node.tree.backend.as_ref()
    }

    /// Current state of the object, queried fresh from the backend.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.backend().entry_kind(self.full_path()).into()
    }

    /// Returns `true` if anything exists at the path on disk.
    ///
    /// Ignores pending registration.
    #[must_use]
    pub fn physically_exists(&self) -> bool {
        self.backend().exists(self.full_path())
    }

    /// Returns `true` if nothing exists at the path on disk yet.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.kind() == ObjectKind::Virtual
    }

    /// Returns `true` if a regular file exists at the path.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind() == ObjectKind::File
    }

    /// Returns `true` if a directory exists at the path.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind() == ObjectKind::Directory
    }

    /// Returns `true` if the object is registered in its parent's pending set.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        if self.is_root() {
            return false;
        }
        self.full_path().parent().is_some_and(|parent_path| {
            self.registry()
                .get(parent_path)
                .is_some_and(|names| names.contains(self.name()))
        })
    }

    /// Returns `true` if the object is on disk or pending in its parent.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.is_pending() || self.physically_exists()
    }

    /// Fails with [`LeafError::NotFound`] unless [`exists`](Self::exists).
    ///
    /// # Errors
    ///
    /// Returns [`LeafError::NotFound`] when the object is neither on disk nor
    /// pending.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.exists() {
            return Ok(());
        }
        trace!("Existence check failed for {}", self.full_path().display());
        Err(LeafError::NotFound {
            path: self.full_path().to_path_buf(),
        })
    }

    fn registry(&self) -> MutexGuard<'_, PendingRegistry> {
        self.node
            .tree
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the children currently pending below this object.
    pub(crate) fn pending_children(&self) -> Vec<Self> {
        let names: Vec<String> = self
            .registry()
            .get(self.full_path())
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default();
        names
            .into_iter()
            .map(|name| self.child_named(name))
            .collect()
    }

    /// Drops this object from its parent's pending set.
    fn promote(&self) {
        let Some(parent_path) = self.full_path().parent() else {
            return;
        };
        let mut registry = self.registry();
        let Some(names) = registry.get_mut(parent_path) else {
            return;
        };
        if names.remove(self.name()) {
            trace!("Promoted {}", self.full_path().display());
        }
        if names.is_empty() {
            registry.remove(parent_path);
        }
    }

    /// Creates the directory for this object and promotes it.
    fn materialize_dir(&self) -> Result<()> {
        self.backend()
            .create_dir(self.full_path())
            .map_err(|e| LeafError::from_io(self.full_path(), e))?;
        self.promote();
        debug!("Materialized directory {}", self.full_path().display());
        Ok(())
    }

    /// Declares a child of this object.
    ///
    /// A virtual `self` is materialized as a directory first. The child is
    /// registered as pending when nothing exists at its path yet. Declaring
    /// an already pending name again keeps the single registration. Only the
    /// base name of `name_or_path` is used.
    ///
    /// # Errors
    ///
    /// - [`LeafError::NotFound`] if `self` does not exist
    /// - [`LeafError::NotADirectory`] if `self` is a file
    /// - [`LeafError::InvalidPath`] if `name_or_path` has no base name
    /// - backend errors from creating the directory
    ///
    /// # Examples
    ///
    /// ```
    /// use leaf_fs::FsObject;
    ///
    /// # fn main() -> leaf_fs::Result<()> {
    /// let temp = tempfile::tempdir().unwrap();
    /// let root = FsObject::new_root(temp.path())?;
    ///
    /// let logs = root.add_child("logs")?;
    /// assert!(logs.is_virtual());
    /// assert!(logs.is_pending());
    ///
    /// let today = logs.add_child("today.log")?;
    /// assert!(logs.is_directory());
    /// assert!(!logs.is_pending());
    /// assert!(today.is_pending());
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_child(&self, name_or_path: impl AsRef<Path>) -> Result<Self> {
        self.ensure_exists()?;
        let name = base_name(name_or_path)?;

        match self.kind() {
            ObjectKind::File => {
                return Err(LeafError::NotADirectory {
                    path: self.full_path().to_path_buf(),
                });
            }
            ObjectKind::Virtual => self.materialize_dir()?,
            ObjectKind::Directory => {}
        }

        let child = self.child_named(name);
        if child.is_virtual()
            && self
                .registry()
                .entry(self.full_path().to_path_buf())
                .or_default()
                .insert(child.name().to_string())
        {
            trace!("Registered pending child {}", child.full_path().display());
        }
        Ok(child)
    }

    /// Adds a child and makes sure it is a real directory.
    ///
    /// # Errors
    ///
    /// Same as [`add_child`](Self::add_child), plus
    /// [`LeafError::NotADirectory`] if a file already sits at the child path.
    ///
    /// # Examples
    ///
    /// ```
    /// use leaf_fs::FsObject;
    ///
    /// # fn main() -> leaf_fs::Result<()> {
    /// let temp = tempfile::tempdir().unwrap();
    /// let root = FsObject::new_root(temp.path())?;
    ///
    /// root.add_directory("a")?.add_directory("b")?;
    /// assert!(temp.path().join("a/b").is_dir());
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_directory(&self, name_or_path: impl AsRef<Path>) -> Result<Self> {
        let child = self.add_child(name_or_path)?;
        match child.kind() {
            ObjectKind::Virtual => child.materialize_dir()?,
            ObjectKind::File => {
                return Err(LeafError::NotADirectory {
                    path: child.full_path().to_path_buf(),
                });
            }
            ObjectKind::Directory => {}
        }
        Ok(child)
    }

    /// Adds a child and makes sure it is a real file.
    ///
    /// A missing file is created empty; an existing one is left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`add_child`](Self::add_child), plus [`LeafError::NotAFile`]
    /// if a directory already sits at the child path.
    pub fn add_file(&self, name_or_path: impl AsRef<Path>) -> Result<Self> {
        let child = self.add_child(name_or_path)?;
        match child.kind() {
            ObjectKind::Virtual => child.write_bytes(&[])?,
            ObjectKind::Directory => {
                return Err(LeafError::NotAFile {
                    path: child.full_path().to_path_buf(),
                });
            }
            ObjectKind::File => {}
        }
        Ok(child)
    }

    /// Guards shared by every content operation.
    fn check_content_access(&self) -> Result<()> {
        self.ensure_exists()?;
        if self.is_directory() {
            return Err(LeafError::IsADirectory {
                path: self.full_path().to_path_buf(),
            });
        }
        Ok(())
    }

    fn read_raw(&self) -> Result<Vec<u8>> {
        self.backend()
            .read(self.full_path())
            .map_err(|e| LeafError::from_io(self.full_path(), e))
    }

    /// Reads the file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// - [`LeafError::NotFound`] if the object does not exist or has no content yet
    /// - [`LeafError::IsADirectory`] if the object is a directory
    /// - [`LeafError::Decode`] if the content is not valid UTF-8
    pub fn read_string(&self) -> Result<String> {
        self.check_content_access()?;
        String::from_utf8(self.read_raw()?).map_err(|e| LeafError::decode(self.full_path(), e))
    }

    /// Reads the file as text split into lines, without line terminators.
    ///
    /// # Errors
    ///
    /// Same as [`read_string`](Self::read_string).
    pub fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self
            .read_string()?
            .lines()
            .map(ToOwned::to_owned)
            .collect())
    }

    /// Reads the raw bytes of the file.
    ///
    /// Also drops the object from its parent's pending set.
    ///
    /// # Errors
    ///
    /// - [`LeafError::NotFound`] if the object does not exist or has no content yet
    /// - [`LeafError::IsADirectory`] if the object is a directory
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        self.check_content_access()?;
        self.promote();
        self.read_raw()
    }

    /// Reads the file and deserializes it from JSON.
    ///
    /// # Errors
    ///
    /// Same as [`read_string`](Self::read_string), with
    /// [`LeafError::Decode`] for malformed JSON or a shape mismatch with `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use leaf_fs::FsObject;
    /// use serde_json::json;
    ///
    /// # fn main() -> leaf_fs::Result<()> {
    /// let temp = tempfile::tempdir().unwrap();
    /// let root = FsObject::new_root(temp.path())?;
    ///
    /// let file = root.add_file("data.json")?;
    /// file.write_json(&json!({"count": 3}))?;
    ///
    /// let value: serde_json::Value = file.read_json()?;
    /// assert_eq!(value["count"], 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn read_json<T: DeserializeOwned>(&self) -> Result<T> {
        self.check_content_access()?;
        serde_json::from_slice(&self.read_raw()?).map_err(|e| LeafError::decode(self.full_path(), e))
    }

    /// Reads the file as an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`read_json`](Self::read_json).
    pub fn read_value(&self) -> Result<serde_json::Value> {
        self.read_json()
    }

    /// Prepares a write: guards, then promotion.
    fn begin_write(&self) -> Result<()> {
        self.check_content_access()?;
        self.promote();
        Ok(())
    }

    /// Replaces the file content with `s`, creating the file if needed.
    ///
    /// # Errors
    ///
    /// - [`LeafError::NotFound`] if the object does not exist
    /// - [`LeafError::IsADirectory`] if the object is a directory
    /// - backend errors from writing
    pub fn write_string(&self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Replaces the file content with `bytes`, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Same as [`write_string`](Self::write_string).
    pub fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.begin_write()?;
        self.backend()
            .write(self.full_path(), bytes)
            .map_err(|e| LeafError::from_io(self.full_path(), e))?;
        debug!(
            "Wrote {} bytes to {}",
            bytes.len(),
            self.full_path().display()
        );
        Ok(())
    }

    /// Appends `s` to the file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Same as [`write_string`](Self::write_string).
    pub fn append_string(&self, s: &str) -> Result<()> {
        self.begin_write()?;
        self.backend()
            .append(self.full_path(), s.as_bytes())
            .map_err(|e| LeafError::from_io(self.full_path(), e))?;
        debug!("Appended {} bytes to {}", s.len(), self.full_path().display());
        Ok(())
    }

    /// Serializes `value` as JSON and replaces the file content with it.
    ///
    /// The layout follows [`LeafConfig::json_format`].
    ///
    /// # Errors
    ///
    /// Same as [`write_string`](Self::write_string), plus
    /// [`LeafError::Encode`] if `value` cannot be serialized.
    pub fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let encoded = match self.config().json_format {
            JsonFormat::Compact => serde_json::to_vec(value),
            JsonFormat::Pretty => serde_json::to_vec_pretty(value),
        }
        .map_err(|e| LeafError::encode(self.full_path(), e))?;
        self.write_bytes(&encoded)
    }

    /// Size of the file in bytes; 0 for directories and virtual objects.
    ///
    /// # Errors
    ///
    /// Returns backend errors from reading the file metadata.
    pub fn size(&self) -> Result<u64> {
        if !self.is_file() {
            return Ok(0);
        }
        self.backend()
            .file_len(self.full_path())
            .map_err(|e| LeafError::from_io(self.full_path(), e))
    }

    /// Removes the object.
    ///
    /// Detaches it from its parent's pending set and forgets every pending
    /// child registered at or below its path, then deletes the file, or the
    /// directory with everything in it. Deleting an object that does not
    /// exist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns backend errors from removing the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use leaf_fs::FsObject;
    ///
    /// # fn main() -> leaf_fs::Result<()> {
    /// let temp = tempfile::tempdir().unwrap();
    /// let root = FsObject::new_root(temp.path())?;
    ///
    /// let file = root.add_file("old.txt")?;
    /// file.delete()?;
    ///
    /// assert!(!temp.path().join("old.txt").exists());
    /// assert!(file.ensure_exists().unwrap_err().is_not_found());
    /// # Ok(())
    /// # }
    /// ```
    pub fn delete(&self) -> Result<()> {
        self.promote();
        self.registry()
            .retain(|parent_path, _| !parent_path.starts_with(self.full_path()));

        let path = self.full_path();
        let removed = match self.backend().entry_kind(path) {
            Some(EntryKind::File) => self.backend().remove_file(path),
            Some(EntryKind::Directory) => self.backend().remove_dir_all(path),
            None => return Ok(()),
        };
        removed.map_err(|e| LeafError::from_io(path, e))?;
        debug!("Deleted {}", path.display());
        Ok(())
    }
}

impl PartialEq for FsObject {
    fn eq(&self, other: &Self) -> bool {
        self.node.full_path == other.node.full_path
    }
}

impl Eq for FsObject {}

impl Hash for FsObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.full_path.hash(state);
    }
}

impl fmt::Display for FsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.full_path().display())
    }
}

impl fmt::Debug for FsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsObject")
            .field("full_path", &self.node.full_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;

    fn memory_root() -> (Arc<MemoryBackend>, FsObject) {
        let backend = Arc::new(MemoryBackend::new());
        backend.create_dir_all("/srv").unwrap();
        let root = RootBuilder::new("/srv")
            .shared_backend(backend.clone())
            .build()
            .unwrap();
        (backend, root)
    }

    fn hash_of(object: &FsObject) -> u64 {
        let mut hasher = DefaultHasher::new();
        object.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_root_identity() {
        let (_, root) = memory_root();
        assert_eq!(root.full_path(), Path::new("/srv"));
        assert_eq!(root.name(), "srv");
        assert!(root.is_root());
        assert!(root.parent().is_none());
        assert_eq!(root.kind(), ObjectKind::Directory);
    }

    #[test]
    fn test_root_path_is_normalized() {
        let (backend, _) = memory_root();
        let root = RootBuilder::new("/srv/./")
            .shared_backend(backend)
            .build()
            .unwrap();
        assert_eq!(root.full_path(), Path::new("/srv"));
    }

    #[test]
    fn test_root_must_be_absolute() {
        let (backend, _) = memory_root();
        let error = RootBuilder::new("srv")
            .shared_backend(backend)
            .build()
            .unwrap_err();
        assert!(error.is_invalid_path());
        assert!(error.to_string().contains("absolute"));
    }

    #[test]
    fn test_root_must_exist() {
        let (backend, _) = memory_root();
        let error = RootBuilder::new("/missing")
            .shared_backend(backend)
            .build()
            .unwrap_err();
        assert!(error.is_invalid_path());
    }

    #[test]
    fn test_add_child_is_virtual_and_pending() {
        let (backend, root) = memory_root();
        let child = root.add_child("notes.txt").unwrap();

        assert_eq!(child.kind(), ObjectKind::Virtual);
        assert!(child.is_pending());
        assert!(child.exists());
        assert!(!child.physically_exists());
        assert!(!backend.exists(Path::new("/srv/notes.txt")));
        assert_eq!(child.parent().unwrap(), root);
    }

    #[test]
    fn test_add_child_uses_base_name() {
        let (_, root) = memory_root();
        let child = root.add_child("/elsewhere/deep/report.tar.gz").unwrap();

        assert_eq!(child.full_path(), Path::new("/srv/report.tar.gz"));
        assert_eq!(child.name(), "report.tar.gz");
        assert_eq!(child.extension(), "tar.gz");
    }

    #[test]
    fn test_add_child_rejects_empty_name() {
        let (_, root) = memory_root();
        assert!(root.add_child("").unwrap_err().is_invalid_path());
        assert!(root.add_child("..").unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_add_child_twice_returns_tracked_handle() {
        let (_, root) = memory_root();
        let first = root.add_child("dir").unwrap();
        let nested = first.add_child("inner").unwrap();
        let second = root.add_child("dir").unwrap();

        assert_eq!(first, second);
        assert!(nested.is_pending());
        assert!(root.pending_children().is_empty());

        let again = first.add_child("inner").unwrap();
        assert_eq!(again, nested);
        assert_eq!(first.pending_children(), vec![nested]);
    }

    #[test]
    fn test_add_child_materializes_virtual_parent() {
        let (backend, root) = memory_root();
        let dir = root.add_child("dir").unwrap();
        assert!(dir.is_pending());

        let file = dir.add_child("file.txt").unwrap();

        assert_eq!(
            backend.entry_kind(Path::new("/srv/dir")),
            Some(EntryKind::Directory)
        );
        assert!(!dir.is_pending());
        assert!(file.is_pending());
    }

    #[test]
    fn test_add_child_existing_entry_not_pending() {
        let (backend, root) = memory_root();
        backend.write(Path::new("/srv/existing"), b"data").unwrap();

        let child = root.add_child("existing").unwrap();
        assert_eq!(child.kind(), ObjectKind::File);
        assert!(!child.is_pending());
    }

    #[test]
    fn test_add_child_on_file_fails() {
        let (_, root) = memory_root();
        let file = root.add_file("plain.txt").unwrap();

        let error = file.add_child("inner").unwrap_err();
        assert!(matches!(error, LeafError::NotADirectory { .. }));
    }

    #[test]
    fn test_add_child_on_missing_object_fails() {
        let (_, root) = memory_root();
        let dir = root.add_directory("gone").unwrap();
        dir.delete().unwrap();

        assert!(dir.add_child("x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_directory_nested() {
        let (backend, root) = memory_root();
        let inner = root
            .add_directory("a")
            .unwrap()
            .add_directory("b")
            .unwrap();

        assert!(inner.is_directory());
        assert_eq!(
            backend.entry_kind(Path::new("/srv/a/b")),
            Some(EntryKind::Directory)
        );
    }

    #[test]
    fn test_add_directory_over_file_fails() {
        let (backend, root) = memory_root();
        backend.write(Path::new("/srv/taken"), b"").unwrap();

        let error = root.add_directory("taken").unwrap_err();
        assert!(matches!(error, LeafError::NotADirectory { .. }));
    }

    #[test]
    fn test_add_file_creates_empty_file() {
        let (backend, root) = memory_root();
        let file = root.add_file("a.json").unwrap();

        assert!(file.is_file());
        assert!(!file.is_pending());
        assert_eq!(backend.read(Path::new("/srv/a.json")).unwrap(), b"");
    }

    #[test]
    fn test_add_file_keeps_existing_content() {
        let (backend, root) = memory_root();
        backend.write(Path::new("/srv/keep.txt"), b"kept").unwrap();

        let file = root.add_file("keep.txt").unwrap();
        assert_eq!(file.read_string().unwrap(), "kept");
    }

    #[test]
    fn test_add_file_over_directory_fails() {
        let (backend, root) = memory_root();
        backend.create_dir_all("/srv/dir").unwrap();

        let error = root.add_file("dir").unwrap_err();
        assert!(matches!(error, LeafError::NotAFile { .. }));
    }

    #[test]
    fn test_write_read_round_trip() {
        let (_, root) = memory_root();
        let file = root.add_child("text.txt").unwrap();

        for content in ["", "hello", "line one\nline two\n", "ünïcødé"] {
            file.write_string(content).unwrap();
            assert_eq!(file.read_string().unwrap(), content);
        }
        assert!(!file.is_pending());
    }

    #[test]
    fn test_read_lines() {
        let (_, root) = memory_root();
        let file = root.add_child("lines.txt").unwrap();
        file.write_string("a\nb\r\nc").unwrap();

        assert_eq!(file.read_lines().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_read_virtual_file_not_found() {
        let (_, root) = memory_root();
        let file = root.add_child("empty").unwrap();

        assert!(file.read_string().unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_bytes_promotes() {
        let (backend, root) = memory_root();
        let file = root.add_child("blob.bin").unwrap();
        backend.write(Path::new("/srv/blob.bin"), &[1, 2, 3]).unwrap();
        assert!(file.is_pending());

        assert_eq!(file.read_bytes().unwrap(), vec![1, 2, 3]);
        assert!(!file.is_pending());
    }

    #[test]
    fn test_read_string_does_not_promote() {
        let (backend, root) = memory_root();
        let file = root.add_child("note").unwrap();
        backend.write(Path::new("/srv/note"), b"x").unwrap();

        file.read_string().unwrap();
        assert!(file.is_pending());
    }

    #[test]
    fn test_read_invalid_utf8() {
        let (_, root) = memory_root();
        let file = root.add_child("bad.txt").unwrap();
        file.write_bytes(&[0xff, 0xfe]).unwrap();

        let error = file.read_string().unwrap_err();
        assert!(matches!(error, LeafError::Decode { .. }));
    }

    #[test]
    fn test_content_io_on_directory() {
        let (_, root) = memory_root();
        let dir = root.add_directory("dir").unwrap();

        assert!(matches!(
            dir.read_string().unwrap_err(),
            LeafError::IsADirectory { .. }
        ));
        assert!(matches!(
            dir.write_string("x").unwrap_err(),
            LeafError::IsADirectory { .. }
        ));
    }

    #[test]
    fn test_append_string() {
        let (_, root) = memory_root();
        let file = root.add_child("log.txt").unwrap();

        file.append_string("one\n").unwrap();
        file.append_string("two\n").unwrap();

        assert_eq!(file.read_lines().unwrap(), vec!["one", "two"]);
        assert_eq!(file.size().unwrap(), 8);
    }

    #[test]
    fn test_json_round_trip() {
        let (_, root) = memory_root();
        let file = root.add_child("data.json").unwrap();
        let value = json!({"name": "leaf", "tags": ["a", "b"], "nested": {"n": 1.5, "ok": true, "none": null}});

        file.write_json(&value).unwrap();

        assert_eq!(file.read_value().unwrap(), value);
        assert!(!file.read_string().unwrap().contains('\n'));
    }

    #[test]
    fn test_json_pretty_layout() {
        let backend = Arc::new(MemoryBackend::new());
        let root = RootBuilder::new("/")
            .shared_backend(backend)
            .config(LeafConfig::builder().json_format(JsonFormat::Pretty).build())
            .build()
            .unwrap();
        let file = root.add_child("pretty.json").unwrap();

        file.write_json(&json!({"a": 1})).unwrap();
        assert_eq!(file.read_string().unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_json_typed() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Settings {
            port: u16,
            name: String,
        }

        let (_, root) = memory_root();
        let file = root.add_child("settings.json").unwrap();
        let settings = Settings {
            port: 8080,
            name: "api".to_string(),
        };

        file.write_json(&settings).unwrap();
        assert_eq!(file.read_json::<Settings>().unwrap(), settings);
    }

    #[test]
    fn test_json_malformed() {
        let (_, root) = memory_root();
        let file = root.add_child("broken.json").unwrap();
        file.write_string("{not json").unwrap();

        let error = file.read_value().unwrap_err();
        assert!(matches!(error, LeafError::Decode { .. }));
    }

    #[test]
    fn test_equality_and_hash_by_path() {
        let (backend, root) = memory_root();
        let a = root.add_file("same.txt").unwrap();
        let other_root = RootBuilder::new("/srv")
            .shared_backend(backend)
            .build()
            .unwrap();
        let b = other_root.add_child("same.txt").unwrap();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, root);
    }

    #[test]
    fn test_display() {
        let (_, root) = memory_root();
        let virt = root.add_child("later").unwrap();
        let file = root.add_file("now.txt").unwrap();

        assert_eq!(root.to_string(), "DIRECTORY: /srv");
        assert_eq!(virt.to_string(), "VIRTUAL: /srv/later");
        assert_eq!(file.to_string(), "FILE: /srv/now.txt");
    }

    #[test]
    fn test_delete_file() {
        let (backend, root) = memory_root();
        let file = root.add_file("doomed.txt").unwrap();

        file.delete().unwrap();

        assert!(!backend.exists(Path::new("/srv/doomed.txt")));
        assert!(file.ensure_exists().unwrap_err().is_not_found());
        assert!(file.read_string().unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_directory_recursive() {
        let (backend, root) = memory_root();
        let dir = root.add_directory("tree").unwrap();
        dir.add_directory("sub").unwrap().add_file("leaf.txt").unwrap();
        let pending = dir.add_child("pending").unwrap();

        dir.delete().unwrap();

        assert!(!backend.exists(Path::new("/srv/tree")));
        assert!(!backend.exists(Path::new("/srv/tree/sub/leaf.txt")));
        assert!(!pending.exists());
    }

    #[test]
    fn test_delete_pending_detaches() {
        let (_, root) = memory_root();
        let child = root.add_child("ghost").unwrap();

        child.delete().unwrap();

        assert!(!child.is_pending());
        assert!(child.ensure_exists().unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (_, root) = memory_root();
        let child = root.child_named("never".to_string());
        child.delete().unwrap();
        child.delete().unwrap();
    }

    #[test]
    fn test_pending_outlives_dropped_handles() {
        let backend = Arc::new(MemoryBackend::new());
        let child = {
            let root = RootBuilder::new("/")
                .shared_backend(backend)
                .build()
                .unwrap();
            root.add_child("kept").unwrap()
        };

        assert!(child.is_pending());
        assert!(child.ensure_exists().is_ok());
        assert_eq!(child.parent().unwrap().full_path(), Path::new("/"));
        assert!(child.parent().unwrap().is_root());
    }

    #[test]
    fn test_chain_survives_dropped_intermediate_handles() {
        let (backend, root) = memory_root();
        let leaf = root
            .add_child("a")
            .unwrap()
            .add_child("b")
            .unwrap()
            .add_child("c.txt")
            .unwrap();

        assert!(leaf.is_pending());
        leaf.write_string("deep").unwrap();
        assert_eq!(backend.read(Path::new("/srv/a/b/c.txt")).unwrap(), b"deep");

        let b = root.add_child("a").unwrap().add_child("b").unwrap();
        let grandchild = b.add_child("d").unwrap().add_child("e.txt").unwrap();
        assert!(grandchild.exists());
        assert!(root.pending_children().is_empty());
    }

    #[test]
    fn test_pending_shared_between_handles() {
        let (_, root) = memory_root();
        let dir = root.add_directory("shared").unwrap();
        dir.add_child("planned").unwrap();

        let other = root.child_named("shared".to_string());
        let names: Vec<_> = other
            .pending_children()
            .iter()
            .map(|child| child.name().to_string())
            .collect();
        assert_eq!(names, vec!["planned"]);
    }

    #[test]
    fn test_delete_forgets_nested_pending() {
        let (_, root) = memory_root();
        let dir = root.add_directory("outer").unwrap();
        let nested = dir.add_directory("inner").unwrap().add_child("planned").unwrap();
        assert!(nested.exists());

        dir.delete().unwrap();

        assert!(!nested.exists());
        assert!(root.add_child("outer").unwrap().pending_children().is_empty());
    }

    #[test]
    fn test_size_of_non_files() {
        let (_, root) = memory_root();
        assert_eq!(root.size().unwrap(), 0);
        assert_eq!(root.add_child("v").unwrap().size().unwrap(), 0);
    }

    #[test]
    fn test_object_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<FsObject>();
        assert_sync::<FsObject>();
    }
}
