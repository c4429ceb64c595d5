//! Error types for filesystem object operations.
//!
//! Every fallible operation in this crate returns [`Result`], whose error
//! side is [`LeafError`]. Each variant carries the path it was raised for and
//! maps to a stable numeric [`ErrorCode`].
//!
//! # Examples
//!
//! ```
//! use leaf_fs::{ErrorCode, LeafError};
//! use std::path::PathBuf;
//!
//! let error = LeafError::NotFound {
//!     path: PathBuf::from("/missing.txt"),
//! };
//!
//! assert!(error.is_not_found());
//! assert_eq!(error.code(), ErrorCode::NotFound);
//! assert_eq!(error.code().as_u8(), 3);
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for filesystem object operations.
pub type Result<T> = std::result::Result<T, LeafError>;

/// Errors that can occur while working with filesystem objects.
#[derive(Error, Debug)]
pub enum LeafError {
    /// A root was built from a relative or missing path, or a child name has
    /// no usable base name.
    #[error("Invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The rejected path
        path: PathBuf,
        /// Why the path was rejected
        reason: String,
    },

    /// An entry already occupies the path that had to be created.
    #[error("Already exists: {}", path.display())]
    AlreadyExists {
        /// The occupied path
        path: PathBuf,
    },

    /// The object is neither on disk nor registered as a pending child.
    #[error("Object {} does not exist", path.display())]
    NotFound {
        /// The missing path
        path: PathBuf,
    },

    /// A file was expected but something else sits at the path.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// The offending path
        path: PathBuf,
    },

    /// A directory was expected but a file sits at the path.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// Content I/O was attempted on a directory.
    #[error("Is a directory: {}", path.display())]
    IsADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// File content could not be decoded as text or JSON.
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode {
        /// The file being decoded
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// A value could not be serialized to JSON.
    #[error("Failed to encode {}: {reason}", path.display())]
    Encode {
        /// The file being written
        path: PathBuf,
        /// Encoder message
        reason: String,
    },

    /// Any other I/O failure reported by the storage backend.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// The path the operation was acting on
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },
}

impl LeafError {
    /// Maps a backend I/O error onto the matching variant.
    ///
    /// Error kinds with a direct counterpart (`NotFound`, `AlreadyExists`,
    /// `IsADirectory`, `NotADirectory`) become that variant; everything else
    /// is wrapped in [`LeafError::Io`].
    pub fn from_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            io::ErrorKind::IsADirectory => Self::IsADirectory { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Builds a [`LeafError::Decode`] from a decoder message.
    pub(crate) fn decode(path: impl AsRef<Path>, reason: impl fmt::Display) -> Self {
        Self::Decode {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Builds a [`LeafError::Encode`] from an encoder message.
    pub(crate) fn encode(path: impl AsRef<Path>, reason: impl fmt::Display) -> Self {
        Self::Encode {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Returns the stable error code of this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPath { .. } => ErrorCode::InvalidPath,
            Self::AlreadyExists { .. } => ErrorCode::AlreadyExists,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::NotAFile { .. } => ErrorCode::NotAFile,
            Self::NotADirectory { .. } => ErrorCode::NotADirectory,
            Self::IsADirectory { .. } => ErrorCode::IsADirectory,
            Self::Decode { .. } => ErrorCode::Decode,
            Self::Encode { .. } => ErrorCode::Encode,
            Self::Io { .. } => ErrorCode::Io,
        }
    }

    /// Returns the path this error was raised for.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::InvalidPath { path, .. }
            | Self::AlreadyExists { path }
            | Self::NotFound { path }
            | Self::NotAFile { path }
            | Self::NotADirectory { path }
            | Self::IsADirectory { path }
            | Self::Decode { path, .. }
            | Self::Encode { path, .. }
            | Self::Io { path, .. } => path,
        }
    }

    /// Returns `true` if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is an invalid path error.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }

    /// Returns `true` if the object exists but has the wrong kind for the
    /// requested operation.
    #[must_use]
    pub const fn is_kind_mismatch(&self) -> bool {
        matches!(
            self,
            Self::NotAFile { .. } | Self::NotADirectory { .. } | Self::IsADirectory { .. }
        )
    }
}

/// Stable numeric codes for [`LeafError`] variants.
///
/// # Examples
///
/// ```
/// use leaf_fs::ErrorCode;
///
/// assert_eq!(ErrorCode::InvalidPath.as_u8(), 1);
/// assert_eq!(ErrorCode::IsADirectory.to_string(), "IS_DIRECTORY");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Root path is relative or missing
    InvalidPath = 1,
    /// Target path is already occupied
    AlreadyExists = 2,
    /// Object does not exist
    NotFound = 3,
    /// Object is not a file
    NotAFile = 4,
    /// Object is not a directory
    NotADirectory = 5,
    /// Object is a directory
    IsADirectory = 6,
    /// Content could not be decoded
    Decode = 7,
    /// Other I/O failure
    Io = 8,
    /// Content could not be encoded
    Encode = 9,
}

impl ErrorCode {
    /// Returns the numeric value of the code.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the symbolic name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPath => "MUST_BE_ABS_PATH",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound => "OBJECT_DOES_NOT_EXIST",
            Self::NotAFile => "IS_NOT_FILE",
            Self::NotADirectory => "IS_NOT_DIRECTORY",
            Self::IsADirectory => "IS_DIRECTORY",
            Self::Decode => "DECODE_ERROR",
            Self::Io => "IO_ERROR",
            Self::Encode => "ENCODE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
