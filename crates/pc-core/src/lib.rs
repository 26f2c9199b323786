//! Passchart core library.
//!
//! Turns a delimited text table into one pass-percentage bar chart per data
//! column, grouped by a key column, and writes the charts as one HTML page.
//!
//! Modules:
//! - `loader`: CSV/TSV reading and column validation
//! - `aggregate`: per-group pass counting
//! - `config`: report configuration resolution
//! - `pipeline`: the end-to-end run
//! - `logging`: structured logging setup
//! - `exit_codes`: process exit code contract

pub mod aggregate;
pub mod config;
pub mod exit_codes;
pub mod loader;
pub mod logging;
pub mod pipeline;

pub use aggregate::{aggregate, aggregate_all, is_blank, is_pass, KeyOrder};
pub use exit_codes::ExitCode;
pub use loader::{load_table, Row, Table};
pub use pipeline::{run, ReportRequest, RunSummary};
