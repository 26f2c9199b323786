//! Exit codes for the passchart CLI.
//!
//! Exit codes communicate the run outcome without requiring output parsing:
//! - 0: report written
//! - 1: the run failed (input, validation, config, render or write error)
//! - 2: the command line could not be parsed

/// Exit codes for passchart runs.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report written successfully.
    Clean = 0,

    /// Any terminal run error; details on stderr.
    Failure = 1,

    /// Invalid command-line arguments.
    ArgsError = 2,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Get the code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::Failure => "ERR_RUN",
            ExitCode::ArgsError => "ERR_ARGS",
        }
    }
}

impl From<&pc_common::Error> for ExitCode {
    fn from(_: &pc_common::Error) -> Self {
        ExitCode::Failure
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
