//! HTML report generator for passchart.
//!
//! Renders per-column pass-percentage datasets into a single self-contained
//! HTML page. Charts are drawn client-side by Google Charts, loaded by URL.
//!
//! # Features
//!
//! - **Single-file output**: one HTML document, one bar chart per data column
//! - **Script-safe embedding**: datasets and options are JSON-encoded with
//!   markup characters escaped, so cell values cannot close the script element
//! - **Stable identifiers**: chart containers and draw functions derive from the
//!   column name; colliding names are rejected
//! - **Atomic writes**: the report is written to a temporary file and renamed
//!
//! # Example
//!
//! ```no_run
//! use pc_common::{ChartDataset, GroupSummary};
//! use pc_report::{ReportConfig, ReportData, ReportGenerator};
//! use std::path::Path;
//!
//! let dataset = ChartDataset::new("result", "unit", vec![GroupSummary::new("A")]);
//! let data = ReportData::new("unit", vec![dataset]).unwrap();
//! let generator = ReportGenerator::new(ReportConfig::default());
//! generator.write(&data, Path::new("charts.html")).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod sections;
pub mod writer;

pub use config::{ChartLayout, ChartsLoader, ReportConfig};
pub use error::{ReportError, Result};
pub use generator::{ReportData, ReportGenerator};
pub use sections::{chart_identifier, ChartSection};
