//! One bar chart per data column.

use crate::config::ChartLayout;
use crate::error::{ReportError, Result};
use pc_common::{ChartDataset, PASS_PERCENTAGE_LABEL};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Normalize a column name into an identifier usable in element ids and
/// JavaScript function names.
///
/// Characters outside `[A-Za-z0-9_]` become `_`; a leading digit (or an empty
/// name) gets a `_` prefix.
pub fn chart_identifier(column: &str) -> String {
    let mut ident: String = column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// A chart section: the dataset plus its stable identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSection {
    /// Normalized identifier derived from the column name.
    pub identifier: String,
    /// Aggregated pass percentages.
    pub dataset: ChartDataset,
}

impl ChartSection {
    /// Create a section, deriving the identifier from the dataset column.
    pub fn new(dataset: ChartDataset) -> Self {
        Self {
            identifier: chart_identifier(&dataset.column),
            dataset,
        }
    }

    /// Data column this chart shows.
    pub fn column(&self) -> &str {
        &self.dataset.column
    }

    /// Id of the container element.
    pub fn container_id(&self) -> String {
        format!("chart_{}", self.identifier)
    }

    /// Name of the JavaScript draw function.
    pub fn draw_function(&self) -> String {
        format!("draw_{}_chart", self.identifier)
    }

    /// Chart title.
    pub fn title(&self) -> String {
        format!("Pass Percentage for {}", self.dataset.column)
    }

    /// Google Charts `BarChart` options: horizontal bars, fixed 0–100 axis.
    pub fn options(&self, layout: &ChartLayout) -> Value {
        json!({
            "title": self.title(),
            "chartArea": { "width": layout.chart_area_width },
            "hAxis": {
                "title": PASS_PERCENTAGE_LABEL,
                "minValue": 0,
                "maxValue": 100,
                "viewWindow": { "min": 0, "max": 100 }
            },
            "vAxis": { "title": self.dataset.key_column },
            "bars": "horizontal",
            "legend": { "position": "none" }
        })
    }
}

/// Build one section per dataset, preserving order.
///
/// Fails if two columns normalize to the same identifier.
pub fn build_sections(datasets: Vec<ChartDataset>) -> Result<Vec<ChartSection>> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut sections = Vec::with_capacity(datasets.len());

    for dataset in datasets {
        let section = ChartSection::new(dataset);
        if let Some(first) = seen.get(&section.identifier) {
            return Err(ReportError::DuplicateChartIdentifier {
                identifier: section.identifier.clone(),
                first: first.clone(),
                second: section.dataset.column.clone(),
            });
        }
        seen.insert(section.identifier.clone(), section.dataset.column.clone());
        sections.push(section);
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_common::GroupSummary;

    fn dataset(column: &str) -> ChartDataset {
        ChartDataset::new(column, "unit", vec![GroupSummary::new("A")])
    }

    #[test]
    fn test_identifier_replaces_spaces() {
        assert_eq!(chart_identifier("pass rate"), "pass_rate");
        assert_eq!(chart_identifier("Smoke Test 2"), "Smoke_Test_2");
    }

    #[test]
    fn test_identifier_replaces_punctuation_and_unicode() {
        assert_eq!(chart_identifier("a-b.c"), "a_b_c");
        assert_eq!(chart_identifier("café"), "caf_");
        assert_eq!(chart_identifier("x');alert(1)//"), "x___alert_1___");
    }

    #[test]
    fn test_identifier_leading_digit_and_empty() {
        assert_eq!(chart_identifier("2024"), "_2024");
        assert_eq!(chart_identifier(""), "_");
    }

    #[test]
    fn test_section_names_are_correlated() {
        let section = ChartSection::new(dataset("build status"));
        assert_eq!(section.identifier, "build_status");
        assert_eq!(section.container_id(), "chart_build_status");
        assert_eq!(section.draw_function(), "draw_build_status_chart");
        assert_eq!(section.title(), "Pass Percentage for build status");
    }

    #[test]
    fn test_options_fix_axis_range() {
        let section = ChartSection::new(dataset("result"));
        let options = section.options(&ChartLayout::default());
        assert_eq!(options["bars"], "horizontal");
        assert_eq!(options["hAxis"]["minValue"], 0);
        assert_eq!(options["hAxis"]["maxValue"], 100);
        assert_eq!(options["hAxis"]["viewWindow"]["max"], 100);
        assert_eq!(options["vAxis"]["title"], "unit");
        assert_eq!(options["title"], "Pass Percentage for result");
    }

    #[test]
    fn test_build_sections_preserves_order() {
        let sections =
            build_sections(vec![dataset("lint"), dataset("unit tests"), dataset("e2e")]).unwrap();
        let ids: Vec<_> = sections.iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, vec!["lint", "unit_tests", "e2e"]);
    }

    #[test]
    fn test_build_sections_rejects_collision() {
        let err = build_sections(vec![dataset("pass rate"), dataset("pass-rate")]).unwrap_err();
        match err {
            ReportError::DuplicateChartIdentifier {
                identifier,
                first,
                second,
            } => {
                assert_eq!(identifier, "pass_rate");
                assert_eq!(first, "pass rate");
                assert_eq!(second, "pass-rate");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_sections_rejects_repeated_column() {
        assert!(build_sections(vec![dataset("result"), dataset("result")]).is_err());
    }
}
