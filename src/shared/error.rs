use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// A truncated graph is still a successful build and exits with `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Graph built (possibly truncated or partial after a timeout)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (root not found, API error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for graph building.
///
/// Only failures that must reach the caller live here. Lookup failures
/// inside a traversal are contained and never become a `GraphError`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Invalid IP asset id: {value}\nReason: {reason}\n\n💡 Hint: IP asset ids are 0x-prefixed 40-digit hex addresses")]
    InvalidIpId { value: String, reason: String },

    #[error("IP asset not found: {ip_id}\n\n💡 Hint: Check the id on the explorer, or verify the configured API url")]
    RootNotFound { ip_id: String },

    #[error("Graph build for {ip_id} timed out after {timeout_secs}s before the root asset was resolved\n\n💡 Hint: Increase the timeout with --timeout")]
    Timeout { ip_id: String, timeout_secs: u64 },

    /// Validation error for requests and configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
