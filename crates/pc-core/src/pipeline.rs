//! End-to-end report run: load → validate → aggregate → render → write.
//!
//! Every stage failure is terminal and nothing is written unless all stages
//! before the write succeed.

use crate::aggregate::{aggregate_all, KeyOrder};
use crate::loader::load_table;
use crate::log_event;
use crate::logging::{event_names, LogContext, Stage};
use pc_common::{ChartDataset, Error, Result};
use pc_report::{ReportConfig, ReportData, ReportGenerator};
use serde::Serialize;
use std::path::PathBuf;

/// One requested report.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Input CSV file.
    pub csv_path: PathBuf,
    /// Column rows are grouped by.
    pub key_column: String,
    /// Columns charted, in output order.
    pub data_columns: Vec<String>,
    /// Destination HTML file.
    pub output: PathBuf,
    /// Field delimiter; `None` picks one from the file extension.
    pub delimiter: Option<u8>,
    /// Group ordering within each chart.
    pub key_order: KeyOrder,
}

impl ReportRequest {
    pub fn new(
        csv_path: impl Into<PathBuf>,
        key_column: impl Into<String>,
        data_columns: Vec<String>,
    ) -> Self {
        ReportRequest {
            csv_path: csv_path.into(),
            key_column: key_column.into(),
            data_columns,
            output: PathBuf::from(DEFAULT_OUTPUT),
            delimiter: None,
            key_order: KeyOrder::default(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_key_order(mut self, order: KeyOrder) -> Self {
        self.key_order = order;
        self
    }
}

/// Output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "charts.html";

/// Outcome of a successful run, printed as the command's JSON payload.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    pub rows_read: usize,
    pub key_column: String,
    pub charts: Vec<ChartSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSummary {
    pub column: String,
    pub identifier: String,
    pub groups: Vec<GroupRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupRow {
    pub key: String,
    pub total: u64,
    pub passes: u64,
    pub percentage: f64,
}

/// Run the full pipeline for `request`.
pub fn run(request: &ReportRequest, config: &ReportConfig, ctx: &LogContext) -> Result<RunSummary> {
    if request.data_columns.is_empty() {
        return Err(Error::InvalidArgument(
            "at least one data column is required".to_string(),
        ));
    }

    log_event!(
        ctx,
        INFO,
        event_names::LOAD_STARTED,
        Stage::Load,
        "Reading input table",
        path = tracing::field::display(request.csv_path.display())
    );
    let table = load_table(&request.csv_path, request.delimiter)?;
    table.require_columns(&request.key_column, &request.data_columns)?;
    log_event!(
        ctx,
        INFO,
        event_names::LOAD_FINISHED,
        Stage::Load,
        "Input table loaded",
        rows = table.len() as u64,
        columns = table.headers().len() as u64
    );

    let datasets = aggregate_all(
        &table,
        &request.key_column,
        &request.data_columns,
        request.key_order,
    )?;
    for ds in &datasets {
        log_event!(
            ctx,
            DEBUG,
            event_names::AGGREGATE_COLUMN_DONE,
            Stage::Aggregate,
            "Column aggregated",
            column = ds.column.as_str(),
            groups = ds.len() as u64
        );
    }
    log_event!(
        ctx,
        INFO,
        event_names::AGGREGATE_FINISHED,
        Stage::Aggregate,
        "Aggregation complete",
        charts = datasets.len() as u64,
        key_order = tracing::field::display(request.key_order)
    );

    let data = ReportData::new(request.key_column.clone(), datasets)?;
    let generator = ReportGenerator::new(config.clone());
    let html = generator.generate(&data)?;
    log_event!(
        ctx,
        INFO,
        event_names::RENDER_FINISHED,
        Stage::Render,
        "Report rendered",
        bytes = html.len() as u64
    );

    pc_report::writer::write_atomic(&request.output, html.as_bytes())?;
    log_event!(
        ctx,
        INFO,
        event_names::WRITE_FINISHED,
        Stage::Write,
        "Report written",
        path = tracing::field::display(request.output.display())
    );

    Ok(RunSummary {
        output: request.output.clone(),
        rows_read: table.len(),
        key_column: request.key_column.clone(),
        charts: data
            .charts
            .iter()
            .map(|section| summarize(&section.identifier, &section.dataset))
            .collect(),
    })
}

fn summarize(identifier: &str, ds: &ChartDataset) -> ChartSummary {
    ChartSummary {
        column: ds.column.clone(),
        identifier: identifier.to_string(),
        groups: ds
            .groups
            .iter()
            .map(|g| GroupRow {
                key: g.key.clone(),
                total: g.total,
                passes: g.passes,
                percentage: g.percentage(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LogContext {
        LogContext::new("run-test")
    }

    fn setup(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("data.csv");
        std::fs::write(&csv, contents).unwrap();
        (dir, csv)
    }

    fn config() -> ReportConfig {
        ReportConfig::default().with_generated_at(false)
    }

    #[test]
    fn test_run_writes_report() {
        let (dir, csv) = setup("unit,result\nA,pass\nA,fail\nB,pass\n");
        let out = dir.path().join("out.html");
        let request = ReportRequest::new(&csv, "unit", vec!["result".into()]).with_output(&out);

        let summary = run(&request, &config(), &ctx()).unwrap();

        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.charts.len(), 1);
        assert_eq!(summary.charts[0].identifier, "result");
        assert_eq!(summary.charts[0].groups[0].percentage, 50.0);
        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains(r#"[["unit","Pass Percentage"],["A",50.0],["B",100.0]]"#));
    }

    #[test]
    fn test_missing_column_writes_nothing() {
        let (dir, csv) = setup("unit,result\nA,pass\n");
        let out = dir.path().join("out.html");
        let request = ReportRequest::new(&csv, "unit", vec!["nope".into()]).with_output(&out);

        let err = run(&request, &config(), &ctx()).unwrap_err();

        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "nope"));
        assert!(!out.exists());
    }

    #[test]
    fn test_duplicate_identifier_writes_nothing() {
        let (dir, csv) = setup("unit,a b,a-b\nA,pass,fail\n");
        let out = dir.path().join("out.html");
        let request = ReportRequest::new(&csv, "unit", vec!["a b".into(), "a-b".into()])
            .with_output(&out);

        let err = run(&request, &config(), &ctx()).unwrap_err();

        assert!(matches!(err, Error::DuplicateChartIdentifier { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_no_data_columns_rejected() {
        let (dir, csv) = setup("unit,result\n");
        let request = ReportRequest::new(&csv, "unit", vec![]).with_output(dir.path().join("o.html"));
        let err = run(&request, &config(), &ctx()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_lexical_order_in_summary() {
        let (dir, csv) = setup("unit,result\nB,pass\nA,fail\n");
        let request = ReportRequest::new(&csv, "unit", vec!["result".into()])
            .with_output(dir.path().join("out.html"))
            .with_key_order(KeyOrder::Lexical);

        let summary = run(&request, &config(), &ctx()).unwrap();

        let keys: Vec<_> = summary.charts[0].groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn test_summary_serializes() {
        let (dir, csv) = setup("unit,result\nA,pass\n");
        let request = ReportRequest::new(&csv, "unit", vec!["result".into()])
            .with_output(dir.path().join("out.html"));
        let summary = run(&request, &config(), &ctx()).unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["rows_read"], 1);
        assert_eq!(json["key_column"], "unit");
        assert_eq!(json["charts"][0]["groups"][0]["percentage"], 100.0);
    }
}
