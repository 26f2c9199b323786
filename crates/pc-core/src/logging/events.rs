//! Structured event definitions for logging.
//!
//! Every event carries the run correlation ID and the pipeline stage it was
//! emitted from.

use serde::{Deserialize, Serialize};

/// Stages of a passchart run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration resolution.
    Init,
    /// Reading and validating the CSV table.
    Load,
    /// Computing per-group pass percentages.
    Aggregate,
    /// Building the HTML document.
    Render,
    /// Writing the document to disk.
    Write,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Load => "load",
            Stage::Aggregate => "aggregate",
            Stage::Render => "render",
            Stage::Write => "write",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";
    pub const RUN_FAILED: &str = "run.failed";

    // Config/init events
    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";

    // Load stage
    pub const LOAD_STARTED: &str = "load.started";
    pub const LOAD_FINISHED: &str = "load.finished";

    // Aggregate stage
    pub const AGGREGATE_COLUMN_DONE: &str = "aggregate.column_done";
    pub const AGGREGATE_FINISHED: &str = "aggregate.finished";

    // Render/write stages
    pub const RENDER_FINISHED: &str = "render.finished";
    pub const WRITE_FINISHED: &str = "write.finished";
}

/// Correlation context shared by all events of one run.
#[derive(Debug, Clone)]
pub struct LogContext {
    /// Unique ID for this invocation.
    pub run_id: String,
}

impl LogContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
        }
    }
}
