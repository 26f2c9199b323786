//! Report section data structures.

pub mod chart;

pub use chart::{build_sections, chart_identifier, ChartSection};
