//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the quizdrill application.
///
/// - 0: Success (quiz or subcommand completed normally)
/// - 1: General error (unexpected failure)
/// - 2: Bank error (embedded or `--bank` question data unusable)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the application exited normally.
    Success = 0,
    /// General error: an unexpected error occurred.
    GeneralError = 1,
    /// Bank error: the question bank is missing, malformed, or empty.
    BankError = 2,
    /// Interrupted: the user aborted with Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "QZ000",
            Self::GeneralError => "QZ001",
            Self::BankError => "QZ002",
            Self::Interrupted => "QZ130",
        }
    }
}

/// Structured error information for `--json-errors` output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "QZ002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}
