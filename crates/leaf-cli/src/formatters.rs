//! Output formatters for CLI commands.
//!
//! Every command builds a serializable report and hands it to
//! [`format_output`], which renders it as JSON, plain text or colored
//! human-readable output.

use crate::types::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
///
/// # Examples
///
/// ```
/// use leaf_cli::formatters::format_output;
/// use leaf_cli::types::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Entry {
///     kind: String,
///     path: String,
/// }
///
/// let entry = Entry {
///     kind: "FILE".to_string(),
///     path: "/tmp/a.json".to_string(),
/// };
///
/// let output = format_output(&entry, OutputFormat::Json)?;
/// assert!(output.contains("\"kind\""));
///
/// let output = format_output(&entry, OutputFormat::Text)?;
/// assert_eq!(output, "kind: FILE\npath: /tmp/a.json");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
///
/// One `key: value` line per scalar field and one line per list item, with
/// nested structures indented. Suited for `grep` and `cut`.
pub mod text {
    use super::{Result, Serialize};
    use serde_json::Value;

    /// Format data as plain text.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        render(&value, 0, &mut lines);
        Ok(lines.join("\n"))
    }

    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::Null => Some(String::new()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn render(value: &Value, indent: usize, lines: &mut Vec<String>) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Array(items) => {
                for item in items {
                    match scalar(item) {
                        Some(s) => lines.push(format!("{pad}{s}")),
                        None => render(item, indent, lines),
                    }
                }
            }
            Value::Object(fields) => {
                for (key, field) in fields {
                    match scalar(field) {
                        Some(s) => lines.push(format!("{pad}{key}: {s}")),
                        None => {
                            lines.push(format!("{pad}{key}:"));
                            render(field, indent + 1, lines);
                        }
                    }
                }
            }
            other => {
                if let Some(s) = scalar(other) {
                    lines.push(format!("{pad}{s}"));
                }
            }
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use std::fmt::Write;

    /// Format data as colorized, human-readable output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(format_value(&value, 0))
    }

    /// Colors an object kind label the same way everywhere.
    #[must_use]
    pub fn kind_label(kind: &str) -> String {
        match kind {
            "DIRECTORY" => kind.blue().bold().to_string(),
            "FILE" => kind.green().to_string(),
            _ => kind.dimmed().to_string(),
        }
    }

    fn format_value(value: &serde_json::Value, indent: usize) -> String {
        use serde_json::Value;

        let indent_str = "  ".repeat(indent);
        let next_indent_str = "  ".repeat(indent + 1);

        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) if is_kind(s) => kind_label(s),
            Value::String(s) => s.green().to_string(),
            Value::Array(arr) => {
                if arr.is_empty() {
                    return "[]".dimmed().to_string();
                }

                let mut result = String::new();
                for item in arr {
                    let _ = write!(
                        result,
                        "\n{next_indent_str}{} {}",
                        "-".dimmed(),
                        format_value(item, indent + 1).trim_start()
                    );
                }
                result
            }
            Value::Object(obj) => {
                if obj.is_empty() {
                    return "{}".dimmed().to_string();
                }

                let mut result = String::new();
                for (i, (key, val)) in obj.iter().enumerate() {
                    if i > 0 || indent > 0 {
                        result.push('\n');
                        result.push_str(&indent_str);
                    }
                    let _ = write!(
                        result,
                        "{}: {}",
                        key.bold(),
                        format_value(val, indent + 1)
                    );
                }
                result
            }
        }
    }

    fn is_kind(s: &str) -> bool {
        matches!(s, "DIRECTORY" | "FILE" | "VIRTUAL")
    }
}
