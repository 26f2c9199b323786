//! Error types for report generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Two data columns normalize to the same chart identifier.
    #[error("columns '{first}' and '{second}' both map to chart identifier '{identifier}'")]
    DuplicateChartIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Template rendering error.
    #[error("template error: {0}")]
    TemplateError(String),

    /// Output could not be written.
    #[error("failed to write '{}': {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<askama::Error> for ReportError {
    fn from(err: askama::Error) -> Self {
        ReportError::TemplateError(err.to_string())
    }
}

impl From<ReportError> for pc_common::Error {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::DuplicateChartIdentifier {
                identifier,
                first,
                second,
            } => pc_common::Error::DuplicateChartIdentifier {
                identifier,
                first,
                second,
            },
            ReportError::JsonError(e) => pc_common::Error::Template(e.to_string()),
            ReportError::TemplateError(msg) => pc_common::Error::Template(msg),
            ReportError::WriteError { path, source } => pc_common::Error::Write { path, source },
            ReportError::InvalidConfig(msg) => pc_common::Error::Config(msg),
        }
    }
}
