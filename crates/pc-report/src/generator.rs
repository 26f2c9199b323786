//! Report generator implementation.

use crate::config::ReportConfig;
use crate::error::Result;
use crate::sections::{build_sections, ChartSection};
use crate::writer::write_atomic;

use askama::Template;
use chrono::{DateTime, Utc};
use pc_common::ChartDataset;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Complete report data structure.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    /// Key column every chart is grouped by.
    pub key_column: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
    /// One section per data column, in request order.
    pub charts: Vec<ChartSection>,
}

impl ReportData {
    /// Build report data from per-column datasets.
    ///
    /// Fails with `DuplicateChartIdentifier` if two columns normalize to the
    /// same identifier.
    pub fn new(key_column: impl Into<String>, datasets: Vec<ChartDataset>) -> Result<Self> {
        Ok(Self {
            key_column: key_column.into(),
            generated_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            charts: build_sections(datasets)?,
        })
    }
}

/// Per-chart values handed to the template.
struct ChartView {
    title: String,
    container_id: String,
    draw_fn: String,
    data_js: String,
    options_js: String,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    title: &'a str,
    heading: &'a str,
    key_column: &'a str,
    version: &'a str,
    loader_src: String,
    load_version_js: String,
    load_options_js: String,
    height_px: u32,
    max_width_px: u32,
    show_generated_at: bool,
    generated_at: String,
    charts: Vec<ChartView>,
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render the report to an HTML string.
    pub fn generate(&self, data: &ReportData) -> Result<String> {
        let html = self.render_template(data)?;

        let output = if self.config.minify {
            let cfg = minify_html::Cfg {
                minify_js: true,
                minify_css: true,
                ..Default::default()
            };
            let minified = minify_html::minify(html.as_bytes(), &cfg);
            minified_or_original(minified, html)
        } else {
            html
        };

        info!(
            bytes = output.len(),
            charts = data.charts.len(),
            title = %self.config.page_title(),
            "Report generated"
        );

        Ok(output)
    }

    /// Render the report and write it to `path`.
    pub fn write(&self, data: &ReportData, path: &Path) -> Result<()> {
        let html = self.generate(data)?;
        write_atomic(path, html.as_bytes())?;
        info!(path = %path.display(), "Report written");
        Ok(())
    }

    fn render_template(&self, data: &ReportData) -> Result<String> {
        let loader = &self.config.loader;
        let layout = &self.config.layout;

        let mut charts = Vec::with_capacity(data.charts.len());
        for section in &data.charts {
            debug!(
                column = %section.column(),
                identifier = %section.identifier,
                rows = section.dataset.len(),
                "Rendering chart"
            );
            charts.push(ChartView {
                title: section.title(),
                container_id: section.container_id(),
                draw_fn: section.draw_function(),
                data_js: script_json(&section.dataset.to_array())?,
                options_js: script_json(&section.options(layout))?,
            });
        }

        let template = ReportTemplate {
            title: self.config.page_title(),
            heading: &self.config.heading,
            key_column: &data.key_column,
            version: &data.generator_version,
            loader_src: html_escape(&loader.loader_url),
            load_version_js: script_json(&Value::from(loader.version.as_str()))?,
            load_options_js: script_json(&serde_json::json!({ "packages": loader.packages }))?,
            height_px: layout.height_px,
            max_width_px: layout.max_width_px,
            show_generated_at: self.config.show_generated_at,
            generated_at: data
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            charts,
        };

        Ok(template.render()?)
    }
}

/// Decode minifier output, keeping the unminified page if it is not UTF-8.
fn minified_or_original(minified: Vec<u8>, original: String) -> String {
    match String::from_utf8(minified) {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Minified report is not valid UTF-8; writing unminified page");
            original
        }
    }
}

/// Serialize a value as a JavaScript literal that is safe inside `<script>`.
///
/// `<`, `>` and `&` only occur inside JSON strings, where the `\uXXXX` forms
/// are equivalent. U+2028/U+2029 are escaped for pre-ES2019 engines.
pub fn script_json(value: &Value) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_common::GroupSummary;

    fn group(key: &str, total: u64, passes: u64) -> GroupSummary {
        GroupSummary {
            key: key.to_string(),
            total,
            passes,
        }
    }

    fn sample_data() -> ReportData {
        let ds = ChartDataset::new("result", "unit", vec![group("A", 2, 1), group("B", 1, 1)]);
        ReportData::new("unit", vec![ds]).unwrap()
    }

    #[test]
    fn test_report_generator_default() {
        let generator = ReportGenerator::default_config();
        assert!(!generator.config().minify);
    }

    #[test]
    fn test_minified_or_original_falls_back_on_invalid_utf8() {
        let original = "<p>page</p>".to_string();
        assert_eq!(
            minified_or_original(vec![0xff, 0xfe], original.clone()),
            original
        );
        assert_eq!(
            minified_or_original(b"<p>min</p>".to_vec(), original),
            "<p>min</p>"
        );
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape(r#""quoted""#), "&quot;quoted&quot;");
    }

    #[test]
    fn test_script_json_escapes_markup() {
        let out = script_json(&Value::from("</script><b>&")).unwrap();
        assert_eq!(out, r#""\u003c/script\u003e\u003cb\u003e\u0026""#);
        assert!(!out.contains('<'));
    }

    #[test]
    fn test_script_json_round_trips_as_json() {
        let value = serde_json::json!([["k", "Pass Percentage"], ["<A>", 50.0]]);
        let out = script_json(&value).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_generate_embeds_dataset() {
        let html = ReportGenerator::default_config()
            .generate(&sample_data())
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"[["unit","Pass Percentage"],["A",50.0],["B",100.0]]"#));
        assert!(html.contains("function draw_result_chart()"));
        assert!(html.contains(r#"id="chart_result""#));
    }

    #[test]
    fn test_empty_report() {
        let data = ReportData::new("unit", vec![]).unwrap();
        let html = ReportGenerator::default_config().generate(&data).unwrap();
        assert!(html.contains("<h1>Data Analysis Report</h1>"));
        assert!(!html.contains("arrayToDataTable"));
    }

    #[test]
    fn test_timestamp_toggle() {
        let data = sample_data();
        let with = ReportGenerator::default_config().generate(&data).unwrap();
        let without = ReportGenerator::new(ReportConfig::default().with_generated_at(false))
            .generate(&data)
            .unwrap();
        assert!(with.contains("Generated:"));
        assert!(!without.contains("Generated:"));
    }

    #[test]
    fn test_minified_output_is_smaller() {
        let data = sample_data();
        let plain = ReportGenerator::default_config().generate(&data).unwrap();
        let minified = ReportGenerator::new(ReportConfig::default().with_minify(true))
            .generate(&data)
            .unwrap();
        assert!(minified.len() < plain.len());
        assert!(minified.contains("arrayToDataTable"));
    }
}
