//! Passchart common types and errors.
//!
//! This crate provides the types shared by the loader, aggregator and renderer:
//! - Per-group pass counters and chart datasets
//! - The error taxonomy with stable codes and remediation hints
//! - Output format selection for the command line

pub mod dataset;
pub mod error;
pub mod output;

pub use dataset::{ChartDataset, GroupSummary, PASS_PERCENTAGE_LABEL};
pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use output::OutputFormat;
