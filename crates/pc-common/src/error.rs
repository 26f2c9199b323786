//! Error types for passchart.
//!
//! Every failure is terminal for a run. Errors carry:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Missing Column
//!   Reason: column 'result' not found; available columns: ["unit", "status"]
//!   Fix: Check the spelling and case of the column name against the header row.
//! ```
//!
//! # Machine-Facing Output
//!
//! ```json
//! {
//!   "code": 20,
//!   "category": "validation",
//!   "message": "column 'result' not found; available columns: [\"unit\", \"status\"]",
//!   "context": { "column": "result", "available": ["unit", "status"] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for passchart operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Input file could not be opened or parsed.
    Input,
    /// Requested columns or arguments do not match the input.
    Validation,
    /// Report could not be assembled.
    Render,
    /// Report could not be written.
    Io,
    /// Report configuration could not be loaded.
    Config,
    /// Broken internal invariant.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Render => write!(f, "render"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Unified error type for passchart.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("file '{}' not found or not readable: {reason}", .path.display())]
    FileNotFound { path: PathBuf, reason: String },

    #[error("failed to parse '{}': {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    // Validation errors (20-29)
    #[error("column '{column}' not found; available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // Render errors (30-39)
    #[error("columns '{first}' and '{second}' both map to chart identifier '{identifier}'")]
    DuplicateChartIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("template error: {0}")]
    Template(String),

    // I/O errors (40-49)
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors (50-59)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal errors (90-99)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Input errors
    /// - 20-29: Validation errors
    /// - 30-39: Render errors
    /// - 40-49: I/O errors
    /// - 50-59: Configuration errors
    /// - 90-99: Internal errors
    pub fn code(&self) -> u32 {
        match self {
            Error::FileNotFound { .. } => 10,
            Error::Parse { .. } => 11,
            Error::MissingColumn { .. } => 20,
            Error::InvalidArgument(_) => 21,
            Error::DuplicateChartIdentifier { .. } => 30,
            Error::Template(_) => 31,
            Error::Write { .. } => 40,
            Error::Config(_) => 50,
            Error::Json(_) => 51,
            Error::Internal(_) => 90,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::FileNotFound { .. } | Error::Parse { .. } => ErrorCategory::Input,
            Error::MissingColumn { .. } | Error::InvalidArgument(_) => ErrorCategory::Validation,
            Error::DuplicateChartIdentifier { .. } | Error::Template(_) => ErrorCategory::Render,
            Error::Write { .. } => ErrorCategory::Io,
            Error::Config(_) | Error::Json(_) => ErrorCategory::Config,
            Error::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::FileNotFound { .. } => {
                "Check that the CSV path exists, is a regular file, and is readable."
            }
            Error::Parse { .. } => {
                "Ensure the file is UTF-8 with a header row and the same number of fields on every line. Use --delimiter for non-comma files."
            }
            Error::MissingColumn { .. } => {
                "Check the spelling and case of the column name against the header row."
            }
            Error::InvalidArgument(_) => "Run 'passchart --help' for argument usage.",
            Error::DuplicateChartIdentifier { .. } => {
                "Request each data column once, and avoid columns that differ only in punctuation or spaces."
            }
            Error::Template(_) => "Report as a bug with the command line that triggered it.",
            Error::Write { .. } => {
                "Check that the output directory exists and is writable, and that the path is not a directory."
            }
            Error::Config(_) => {
                "Check the --config path or PASSCHART_CONFIG, or remove the file to use built-in defaults."
            }
            Error::Json(_) => "Report as a bug; rerun with --format human to get the report path.",
            Error::Internal(_) => "Report as a bug with the input file and command line.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::FileNotFound { .. } => "File Not Found",
            Error::Parse { .. } => "CSV Parse Error",
            Error::MissingColumn { .. } => "Missing Column",
            Error::InvalidArgument(_) => "Invalid Argument",
            Error::DuplicateChartIdentifier { .. } => "Duplicate Chart Identifier",
            Error::Template(_) => "Template Error",
            Error::Write { .. } => "Write Error",
            Error::Config(_) => "Configuration Error",
            Error::Json(_) => "JSON Error",
            Error::Internal(_) => "Internal Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Additional structured context (e.g., column, path).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::FileNotFound { path, .. } | Error::Parse { path, .. } | Error::Write { path, .. } => {
                context.insert("path".to_string(), serde_json::json!(path.display().to_string()));
            }
            Error::MissingColumn { column, available } => {
                context.insert("column".to_string(), serde_json::json!(column));
                context.insert("available".to_string(), serde_json::json!(available));
            }
            Error::DuplicateChartIdentifier {
                identifier,
                first,
                second,
            } => {
                context.insert("identifier".to_string(), serde_json::json!(identifier));
                context.insert("columns".to_string(), serde_json::json!([first, second]));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
