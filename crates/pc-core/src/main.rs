//! passchart - pass percentage charts from tabular test results
//!
//! Reads a CSV file, groups rows by a key column and writes one HTML page
//! with a horizontal bar chart per data column showing the share of rows
//! marked `pass` in each group.

use clap::{Args, Parser};
use pc_common::{format_error_human, Error, OutputFormat, StructuredError};
use pc_core::config::{load_report_config, ConfigLocations};
use pc_core::exit_codes::ExitCode;
use pc_core::loader::parse_delimiter;
use pc_core::log_event;
use pc_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogContext, LogLevel, Stage,
};
use pc_core::pipeline::{self, ReportRequest, RunSummary, DEFAULT_OUTPUT};
use pc_core::KeyOrder;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Generate per-group pass percentage bar charts from a CSV file
#[derive(Parser, Debug)]
#[command(name = "passchart")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV file (tab-delimited when the extension is .tsv)
    csv_file: PathBuf,

    /// Column whose values group the rows
    key_column: String,

    /// Columns to chart; a row passes when the value is "pass" (any case)
    #[arg(required = true, num_args = 1..)]
    data_columns: Vec<String>,

    /// Output HTML file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    #[command(flatten)]
    render: RenderOpts,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Input and page options
#[derive(Args, Debug)]
struct RenderOpts {
    /// Field delimiter (single character, or \t for tab)
    #[arg(long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// Order of groups within each chart
    #[arg(long, value_enum, default_value_t = KeyOrder::FirstSeen)]
    key_order: KeyOrder,

    /// Page title (overrides the config file)
    #[arg(long)]
    title: Option<String>,

    /// Report configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minify the generated HTML
    #[arg(long)]
    minify: bool,

    /// Omit the generation timestamp so identical inputs give identical files
    #[arg(long)]
    no_timestamp: bool,
}

/// Output and diagnostics options
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format for the run summary
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also arrive here and are not failures
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = (cli.global.quiet || cli.global.verbose > 0)
        .then(|| LogLevel::from_verbosity(cli.global.quiet, cli.global.verbose));
    init_logging(&LogConfig::from_env(cli_level, None));

    let ctx = LogContext::new(generate_run_id());
    let exit_code = match execute(&cli, &ctx) {
        Ok(summary) => {
            log_event!(
                ctx,
                INFO,
                event_names::RUN_FINISHED,
                Stage::Write,
                "Run finished",
                charts = summary.charts.len() as u64
            );
            output_summary(&cli.global, &summary)
        }
        Err(err) => {
            log_event!(
                ctx,
                DEBUG,
                event_names::RUN_FAILED,
                Stage::Init,
                "Run failed",
                code = err.code() as u64
            );
            output_error(&cli.global, &ctx, &err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn execute(cli: &Cli, ctx: &LogContext) -> pc_common::Result<RunSummary> {
    log_event!(
        ctx,
        INFO,
        event_names::RUN_STARTED,
        Stage::Init,
        "Starting run",
        columns = cli.data_columns.len() as u64
    );

    let locations = ConfigLocations::from_env();
    let resolved = load_report_config(cli.render.config.as_deref(), &locations)?;
    match &resolved.path {
        Some(path) => log_event!(
            ctx,
            INFO,
            event_names::CONFIG_LOADED,
            Stage::Init,
            "Loaded report configuration",
            source = tracing::field::display(resolved.source),
            path = tracing::field::display(path.display())
        ),
        None => log_event!(
            ctx,
            DEBUG,
            event_names::CONFIG_DEFAULT_USED,
            Stage::Init,
            "Using default report configuration"
        ),
    }

    let mut config = resolved.config;
    if let Some(title) = &cli.render.title {
        config = config.with_title(title.clone());
    }
    if cli.render.minify {
        config = config.with_minify(true);
    }
    if cli.render.no_timestamp {
        config = config.with_generated_at(false);
    }

    let request = ReportRequest::new(
        &cli.csv_file,
        cli.key_column.clone(),
        cli.data_columns.clone(),
    )
    .with_output(&cli.output)
    .with_delimiter(cli.render.delimiter)
    .with_key_order(cli.render.key_order);

    pipeline::run(&request, &config, ctx)
}

fn output_summary(global: &GlobalOpts, summary: &RunSummary) -> ExitCode {
    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                let err = Error::Json(e);
                eprintln!("{}", format_error_human(&err, use_color(global)));
                return ExitCode::from(&err);
            }
        },
        OutputFormat::Human => {
            println!("Generated chart file: {}", summary.output.display());
        }
    }
    ExitCode::Clean
}

fn output_error(global: &GlobalOpts, ctx: &LogContext, err: &Error) -> ExitCode {
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "status": "error",
                "run_id": ctx.run_id,
                "error": StructuredError::from(err),
            });
            let rendered = serde_json::to_string_pretty(&response)
                .unwrap_or_else(|_| StructuredError::from(err).to_json());
            eprintln!("{}", rendered);
        }
        OutputFormat::Human => {
            eprintln!("{}", format_error_human(err, use_color(global)));
        }
    }
    ExitCode::from(err)
}

fn use_color(global: &GlobalOpts) -> bool {
    !global.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}
