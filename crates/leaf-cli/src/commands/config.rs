//! Config command implementation.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/leaf/config.toml`
//! - macOS: `~/Library/Application Support/leaf/config.toml`
//! - Windows: `%APPDATA%\leaf\config.toml`

use crate::actions::ConfigAction;
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};
use anyhow::{Context, Result};
use leaf_fs::{JsonFormat, LeafConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CLI configuration.
///
/// # Examples
///
/// ```toml
/// [general]
/// default_format = "pretty"
/// log_level = "info"
///
/// [fs]
/// json_format = "compact"
/// dedupe_children = true
/// include_hidden = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Filesystem object settings
    #[serde(default)]
    pub fs: FsConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Output format used when `--format` is not given (json, text, pretty)
    pub default_format: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: "pretty".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Filesystem object settings, mirrored into [`LeafConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FsConfig {
    /// Layout of written JSON
    pub json_format: JsonFormat,

    /// Yield a child only once when it is both pending and on disk
    pub dedupe_children: bool,

    /// List entries whose names start with a dot
    pub include_hidden: bool,
}

impl Default for FsConfig {
    fn default() -> Self {
        let defaults = LeafConfig::default();
        Self {
            json_format: defaults.json_format,
            dedupe_children: defaults.dedupe_children,
            include_hidden: defaults.include_hidden,
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let valid_formats = ["json", "text", "pretty"];
        if !valid_formats.contains(&self.general.default_format.as_str()) {
            anyhow::bail!(
                "invalid default_format '{}', must be one of: {}",
                self.general.default_format,
                valid_formats.join(", ")
            );
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            anyhow::bail!(
                "invalid log_level '{}', must be one of: {}",
                self.general.log_level,
                valid_levels.join(", ")
            );
        }

        Ok(())
    }

    /// Output format to use when none is given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if `default_format` is not a known format.
    pub fn default_format(&self) -> Result<OutputFormat> {
        self.general.default_format.parse()
    }

    /// Builds the library configuration from the `[fs]` section.
    #[must_use]
    pub fn leaf_config(&self) -> LeafConfig {
        LeafConfig::builder()
            .json_format(self.fs.json_format)
            .dedupe_children(self.fs.dedupe_children)
            .include_hidden(self.fs.include_hidden)
            .build()
    }
}

/// Returns the platform-specific configuration file path.
///
/// # Errors
///
/// Returns an error if the platform has no configuration directory.
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("failed to determine config directory")?;

    Ok(config_dir.join("leaf").join("config.toml"))
}

/// Loads the configuration from the default path, or returns defaults when
/// the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed or
/// validated.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Loads the configuration from `path`, or returns defaults when the file
/// does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed or
/// validated.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).context("failed to read config file")?;
    let config: Config = toml::from_str(&content).context("failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

/// Saves the configuration to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or cannot be written.
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    let toml_str = toml::to_string_pretty(config).context("failed to serialize config")?;
    fs::write(path, toml_str).context("failed to write config file")?;

    debug!("Saved config to {}", path.display());
    Ok(())
}

/// Gets a configuration value by key path (e.g., `fs.json_format`).
#[must_use]
pub fn value_by_key(config: &Config, key: &str) -> Option<String> {
    match key {
        "general.default_format" => Some(config.general.default_format.clone()),
        "general.log_level" => Some(config.general.log_level.clone()),
        "fs.json_format" => Some(config.fs.json_format.to_string()),
        "fs.dedupe_children" => Some(config.fs.dedupe_children.to_string()),
        "fs.include_hidden" => Some(config.fs.include_hidden.to_string()),
        _ => None,
    }
}

/// Initialization result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InitResult {
    /// Whether a new file was written
    pub created: bool,
    /// Status message
    pub message: String,
    /// Configuration file path
    pub path: String,
}

/// Configuration value result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigValue {
    /// Configuration key
    pub key: String,
    /// Configuration value
    pub value: String,
}

/// Writes a default configuration to `path` unless one already exists.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn init_at(path: &Path) -> Result<InitResult> {
    if path.exists() {
        return Ok(InitResult {
            created: false,
            message: "configuration file already exists".to_string(),
            path: path.display().to_string(),
        });
    }

    save_config_to(&Config::default(), path)?;
    Ok(InitResult {
        created: true,
        message: "configuration file created with default values".to_string(),
        path: path.display().to_string(),
    })
}

/// Runs the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or written.
pub fn run(action: &ConfigAction, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Config action: {:?}", action);

    let path = config_path()?;
    let formatted = match action {
        ConfigAction::Show => format_output(&load_config_from(&path)?, output_format)?,
        ConfigAction::Path => format_output(&path, output_format)?,
        ConfigAction::Init => format_output(&init_at(&path)?, output_format)?,
        ConfigAction::Get { key } => {
            let config = load_config_from(&path)?;
            let Some(value) = value_by_key(&config, key) else {
                anyhow::bail!(
                    "configuration key '{key}' not found\n\nAvailable keys:\n\
                     - general.default_format\n\
                     - general.log_level\n\
                     - fs.json_format\n\
                     - fs.dedupe_children\n\
                     - fs.include_hidden"
                );
            };
            format_output(
                &ConfigValue {
                    key: key.clone(),
                    value,
                },
                output_format,
            )?
        }
    };
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.default_format, "pretty");
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.fs.json_format, JsonFormat::Compact);
        assert!(config.fs.dedupe_children);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.fs.json_format = JsonFormat::Pretty;
        config.fs.include_hidden = false;

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[fs]"));
        assert!(text.contains("json_format = \"pretty\""));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[fs]\njson_format = \"pretty\"\n").unwrap();

        assert_eq!(config.fs.json_format, JsonFormat::Pretty);
        assert!(config.fs.dedupe_children);
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[test]
    fn test_validate_rejects_unknown_values() {
        let mut config = Config::default();
        config.general.default_format = "yaml".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_leaf_config_mirrors_fs_section() {
        let mut config = Config::default();
        config.fs.dedupe_children = false;
        config.fs.json_format = JsonFormat::Pretty;

        let leaf = config.leaf_config();
        assert!(!leaf.dedupe_children);
        assert_eq!(leaf.json_format, JsonFormat::Pretty);
        assert!(leaf.include_hidden);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config_from(&temp.path().join("none.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[general]\nlog_level = \"loud\"\n").unwrap();

        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_init_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("leaf/config.toml");

        let first = init_at(&path).unwrap();
        assert!(first.created);
        let second = init_at(&path).unwrap();
        assert!(!second.created);

        assert_eq!(load_config_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_value_by_key() {
        let config = Config::default();
        assert_eq!(
            value_by_key(&config, "fs.json_format"),
            Some("compact".to_string())
        );
        assert_eq!(
            value_by_key(&config, "general.log_level"),
            Some("warn".to_string())
        );
        assert_eq!(value_by_key(&config, "fs.unknown"), None);
    }

    #[test]
    fn test_default_format() {
        let mut config = Config::default();
        config.general.default_format = "json".to_string();
        assert_eq!(config.default_format().unwrap(), OutputFormat::Json);
    }
}
