//! Output format selection.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Format of the run summary printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One confirmation line naming the written file
    #[default]
    Human,

    /// Pretty-printed JSON run summary with per-group counts
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
