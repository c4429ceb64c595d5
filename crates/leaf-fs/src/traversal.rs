//! Lazy traversal and queries over filesystem objects.
//!
//! [`FsObject::children`] lists the pending children of a directory first,
//! then whatever the backend reports on disk. Everything else here is built
//! on top of it: [`Search`] walks children depth-first in pre-order and
//! yields the objects accepted by a predicate.
//!
//! Iterators are pull-based and never cached. Calling a traversal again
//! re-reads the backend.
//!
//! # Examples
//!
//! ```
//! use leaf_fs::FsObject;
//!
//! # fn main() -> leaf_fs::Result<()> {
//! let temp = tempfile::tempdir().unwrap();
//! let root = FsObject::new_root(temp.path())?;
//!
//! let test = root.add_directory("test")?;
//! test.add_file("a.json")?;
//! test.add_directory("nested")?.add_file("b.json")?;
//!
//! let json: Vec<_> = root
//!     .search(|object| object.extension() == "json", true)?
//!     .collect::<leaf_fs::Result<_>>()?;
//! assert_eq!(json.len(), 2);
//!
//! let found = root.search_first(|object| object.name() == "b.json", true)?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

use crate::backend::DirNames;
use crate::error::{LeafError, Result};
use crate::object::FsObject;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::vec;
use tracing::{trace, warn};

/// Plain function predicate used by the non-generic traversals.
pub type ObjectFilter = fn(&FsObject) -> bool;

/// Pre-order walk over every object below a directory.
pub type Descendants = Search<ObjectFilter>;

/// Lazy iterator over the direct children of an object.
///
/// Yields pending children first, then the entries listed by the backend.
/// Listing errors are yielded as items; iteration can continue after them.
pub struct Children {
    parent: FsObject,
    pending: vec::IntoIter<FsObject>,
    listing: Option<DirNames>,
    pending_paths: HashSet<PathBuf>,
    dedupe: bool,
    include_hidden: bool,
}

impl Children {
    fn empty(parent: FsObject) -> Self {
        Self {
            parent,
            pending: Vec::new().into_iter(),
            listing: None,
            pending_paths: HashSet::new(),
            dedupe: false,
            include_hidden: true,
        }
    }

    fn listed(parent: FsObject, listing: DirNames) -> Self {
        let pending = parent.pending_children();
        let pending_paths = pending
            .iter()
            .map(|child| child.full_path().to_path_buf())
            .collect();
        let dedupe = parent.config().dedupe_children;
        let include_hidden = parent.config().include_hidden;

        Self {
            parent,
            pending: pending.into_iter(),
            listing: Some(listing),
            pending_paths,
            dedupe,
            include_hidden,
        }
    }

    /// The object whose children are being listed.
    #[must_use]
    pub const fn parent(&self) -> &FsObject {
        &self.parent
    }
}

impl Iterator for Children {
    type Item = Result<FsObject>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(child) = self.pending.next() {
            return Some(Ok(child));
        }

        let listing = self.listing.as_mut()?;
        loop {
            let name = match listing.next()? {
                Ok(name) => name,
                Err(e) => return Some(Err(LeafError::from_io(self.parent.full_path(), e))),
            };
            let name = match name.into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(
                        "Skipping non UTF-8 entry {raw:?} in {}",
                        self.parent.full_path().display()
                    );
                    continue;
                }
            };
            if !self.include_hidden && name.starts_with('.') {
                continue;
            }

            let child = self.parent.child_named(name);
            if self.dedupe && self.pending_paths.contains(child.full_path()) {
                continue;
            }
            return Some(Ok(child));
        }
    }
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("parent", &self.parent)
            .field("pending_left", &self.pending.len())
            .field("listing", &self.listing.is_some())
            .finish_non_exhaustive()
    }
}

enum Frame {
    Expand(FsObject),
    Iter(Children),
}

/// Depth-first, pre-order search below an object.
///
/// Every visited object is tested against the predicate and yielded on a
/// match. In recursive mode every child is descended into, whether it
/// matched or not.
pub struct Search<P> {
    stack: Vec<Frame>,
    predicate: P,
    recursive: bool,
}

impl<P> Search<P>
where
    P: FnMut(&FsObject) -> bool,
{
    fn new(children: Children, predicate: P, recursive: bool) -> Self {
        Self {
            stack: vec![Frame::Iter(children)],
            predicate,
            recursive,
        }
    }
}

impl<P> Iterator for Search<P>
where
    P: FnMut(&FsObject) -> bool,
{
    type Item = Result<FsObject>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut children = match self.stack.pop()? {
                Frame::Iter(children) => children,
                Frame::Expand(object) => match object.children() {
                    Ok(children) => children,
                    Err(e) => return Some(Err(e)),
                },
            };

            match children.next() {
                None => {}
                Some(Err(e)) => {
                    self.stack.push(Frame::Iter(children));
                    return Some(Err(e));
                }
                Some(Ok(child)) => {
                    self.stack.push(Frame::Iter(children));
                    if self.recursive {
                        self.stack.push(Frame::Expand(child.clone()));
                    }
                    if (self.predicate)(&child) {
                        return Some(Ok(child));
                    }
                }
            }
        }
    }
}

impl<P> fmt::Debug for Search<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("depth", &self.stack.len())
            .field("recursive", &self.recursive)
            .finish_non_exhaustive()
    }
}

impl FsObject {
    /// Lists the direct children of this object.
    ///
    /// Empty for files and for directories that are not on disk yet.
    ///
    /// # Errors
    ///
    /// Returns [`LeafError::NotFound`] if the object does not exist, or the
    /// mapped backend error if the directory cannot be listed.
    ///
    /// # Examples
    ///
    /// ```
    /// use leaf_fs::FsObject;
    ///
    /// # fn main() -> leaf_fs::Result<()> {
    /// let temp = tempfile::tempdir().unwrap();
    /// let root = FsObject::new_root(temp.path())?;
    /// assert_eq!(root.children()?.count(), 0);
    ///
    /// root.add_file("a.json")?;
    /// root.add_child("later")?;
    /// assert_eq!(root.children()?.count(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn children(&self) -> Result<Children> {
        self.ensure_exists()?;
        if !self.is_directory() {
            return Ok(Children::empty(self.clone()));
        }

        trace!("Listing {}", self.full_path().display());
        let listing = self
            .backend()
            .read_dir(self.full_path())
            .map_err(|e| LeafError::from_io(self.full_path(), e))?;
        Ok(Children::listed(self.clone(), listing))
    }

    /// Walks every object below this one, each node before its children.
    ///
    /// # Errors
    ///
    /// Same as [`children`](Self::children).
    pub fn descendants(&self) -> Result<Descendants> {
        self.search(accept_all as ObjectFilter, true)
    }

    /// Yields the children accepted by `predicate`.
    ///
    /// With `recursive` set, the whole subtree is searched in pre-order.
    ///
    /// # Errors
    ///
    /// Same as [`children`](Self::children).
    pub fn search<P>(&self, predicate: P, recursive: bool) -> Result<Search<P>>
    where
        P: FnMut(&FsObject) -> bool,
    {
        Ok(Search::new(self.children()?, predicate, recursive))
    }

    /// Returns `true` if any object matches `predicate`.
    ///
    /// Stops at the first match.
    ///
    /// # Errors
    ///
    /// Same as [`children`](Self::children), plus listing errors met before
    /// the first match.
    pub fn search_any<P>(&self, predicate: P, recursive: bool) -> Result<bool>
    where
        P: FnMut(&FsObject) -> bool,
    {
        Ok(self.search_first(predicate, recursive)?.is_some())
    }

    /// Returns the first object matching `predicate`, if any.
    ///
    /// # Errors
    ///
    /// Same as [`search_any`](Self::search_any).
    pub fn search_first<P>(&self, predicate: P, recursive: bool) -> Result<Option<Self>>
    where
        P: FnMut(&FsObject) -> bool,
    {
        self.search(predicate, recursive)?.next().transpose()
    }

    /// Direct children that are directories on disk.
    ///
    /// # Errors
    ///
    /// Same as [`children`](Self::children).
    pub fn directories(&self) -> Result<Search<ObjectFilter>> {
        self.search(Self::is_directory as ObjectFilter, false)
    }

    /// Direct children that are files on disk.
    ///
    /// # Errors
    ///
    /// Same as [`children`](Self::children).
    pub fn files(&self) -> Result<Search<ObjectFilter>> {
        self.search(Self::is_file as ObjectFilter, false)
    }
}

const fn accept_all(_: &FsObject) -> bool {
    true
}
