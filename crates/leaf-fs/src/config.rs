//! Configuration for filesystem object trees.
//!
//! A [`LeafConfig`] is attached to a root when it is built and shared by
//! every object reached from that root.
//!
//! # Examples
//!
//! ```
//! use leaf_fs::{JsonFormat, LeafConfig};
//!
//! // Use default configuration
//! let config = LeafConfig::default();
//! assert_eq!(config.json_format, JsonFormat::Compact);
//! assert!(config.dedupe_children);
//!
//! // Customize through the builder
//! let custom = LeafConfig::builder()
//!     .json_format(JsonFormat::Pretty)
//!     .include_hidden(false)
//!     .build();
//! assert!(!custom.include_hidden);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout used when serializing JSON content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonFormat {
    /// Single line, no extra whitespace
    #[default]
    Compact,
    /// Indented, two spaces per level
    Pretty,
}

impl JsonFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for JsonFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JsonFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(format!(
                "invalid json format: '{s}' (expected: compact or pretty)"
            )),
        }
    }
}

/// Behavior switches shared by all objects of one tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafConfig {
    /// Layout used by `write_json`.
    ///
    /// Default: compact
    pub json_format: JsonFormat,

    /// Yield a child only once when it is both pending and listed on disk.
    ///
    /// A pending child normally leaves the pending set as soon as it is
    /// materialized. Turning this off yields such a child twice if it was
    /// created on disk behind the object's back.
    /// Default: true
    pub dedupe_children: bool,

    /// Include entries whose names start with `.` in directory listings.
    ///
    /// Default: true
    pub include_hidden: bool,
}

impl Default for LeafConfig {
    fn default() -> Self {
        Self {
            json_format: JsonFormat::Compact,
            dedupe_children: true,
            include_hidden: true,
        }
    }
}

impl LeafConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> LeafConfigBuilder {
        LeafConfigBuilder::new()
    }
}

/// Builder for [`LeafConfig`].
///
/// # Examples
///
/// ```
/// use leaf_fs::LeafConfig;
///
/// let config = LeafConfig::builder().dedupe_children(false).build();
/// assert!(!config.dedupe_children);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeafConfigBuilder {
    config: LeafConfig,
}

impl LeafConfigBuilder {
    /// Creates a builder starting from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layout used by `write_json`.
    #[must_use]
    pub const fn json_format(mut self, format: JsonFormat) -> Self {
        self.config.json_format = format;
        self
    }

    /// Sets whether children are deduplicated by path.
    #[must_use]
    pub const fn dedupe_children(mut self, dedupe: bool) -> Self {
        self.config.dedupe_children = dedupe;
        self
    }

    /// Sets whether hidden entries are listed.
    #[must_use]
    pub const fn include_hidden(mut self, include: bool) -> Self {
        self.config.include_hidden = include;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> LeafConfig {
        self.config
    }
}
