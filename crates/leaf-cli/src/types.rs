//! CLI-specific types.
//!
//! # Examples
//!
//! ```
//! use leaf_cli::types::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format, OutputFormat::Json);
//!
//! assert_eq!(ExitCode::NOT_FOUND.as_i32(), 3);
//! ```

use leaf_fs::LeafError;
use std::fmt;
use std::str::FromStr;

/// CLI output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Pretty-printed output with colors for human reading
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => anyhow::bail!("invalid output format: '{s}' (expected: json, text, or pretty)"),
        }
    }
}

/// CLI exit code with semantic meaning.
///
/// # Examples
///
/// ```
/// use leaf_cli::types::ExitCode;
///
/// assert!(ExitCode::SUCCESS.is_success());
/// assert!(!ExitCode::ERROR.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid input or arguments (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// Requested object does not exist (exit code 3).
    pub const NOT_FOUND: Self = Self(3);

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Picks the exit code for a failed command.
    ///
    /// Filesystem errors anywhere in the chain decide the code; anything
    /// else is a general error.
    ///
    /// # Examples
    ///
    /// ```
    /// use leaf_cli::types::ExitCode;
    /// use leaf_fs::LeafError;
    ///
    /// let error = anyhow::Error::new(LeafError::NotFound { path: "/x".into() })
    ///     .context("failed to read");
    /// assert_eq!(ExitCode::for_error(&error), ExitCode::NOT_FOUND);
    /// ```
    #[must_use]
    pub fn for_error(error: &anyhow::Error) -> Self {
        let leaf = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<LeafError>());
        match leaf {
            Some(LeafError::NotFound { .. }) => Self::NOT_FOUND,
            Some(LeafError::InvalidPath { .. }) => Self::INVALID_INPUT,
            _ => Self::ERROR,
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
