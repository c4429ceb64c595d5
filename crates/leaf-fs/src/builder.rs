//! Builder for root objects.
//!
//! Picks the backend and configuration a tree of objects runs on.
//!
//! # Examples
//!
//! ```
//! use leaf_fs::backend::MemoryBackend;
//! use leaf_fs::{JsonFormat, LeafConfig, RootBuilder};
//!
//! let backend = MemoryBackend::new();
//! backend.create_dir_all("/data").unwrap();
//!
//! let root = RootBuilder::new("/data")
//!     .backend(backend)
//!     .config(LeafConfig::builder().json_format(JsonFormat::Pretty).build())
//!     .build()
//!     .unwrap();
//!
//! assert!(root.is_directory());
//! ```

use crate::backend::{Backend, LocalBackend};
use crate::config::LeafConfig;
use crate::error::Result;
use crate::object::FsObject;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builder for a root [`FsObject`].
///
/// Defaults to [`LocalBackend`] and [`LeafConfig::default`].
#[derive(Debug)]
pub struct RootBuilder {
    path: PathBuf,
    backend: Option<Arc<dyn Backend>>,
    config: LeafConfig,
}

impl RootBuilder {
    /// Starts a builder for the root at `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            backend: None,
            config: LeafConfig::default(),
        }
    }

    /// Uses `backend` for every disk access of the tree.
    #[must_use]
    pub fn backend(mut self, backend: impl Backend + 'static) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Uses a backend that is shared with other roots or with the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use leaf_fs::backend::{Backend, MemoryBackend};
    /// use leaf_fs::RootBuilder;
    /// use std::path::Path;
    /// use std::sync::Arc;
    ///
    /// let backend = Arc::new(MemoryBackend::new());
    /// let root = RootBuilder::new("/")
    ///     .shared_backend(backend.clone())
    ///     .build()
    ///     .unwrap();
    ///
    /// root.add_file("created.txt").unwrap();
    /// assert!(backend.exists(Path::new("/created.txt")));
    /// ```
    #[must_use]
    pub fn shared_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the configuration shared by the tree.
    #[must_use]
    pub fn config(mut self, config: LeafConfig) -> Self {
        self.config = config;
        self
    }

    /// Opens the root.
    ///
    /// # Errors
    ///
    /// Returns [`LeafError::InvalidPath`](crate::LeafError::InvalidPath) if
    /// the path is relative or nothing exists there.
    pub fn build(self) -> Result<FsObject> {
        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(LocalBackend::new()));
        FsObject::root(&self.path, backend, Arc::new(self.config))
    }
}
