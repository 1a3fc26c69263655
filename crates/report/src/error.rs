//! Error types for report conversion

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Missing Node/Playwright, bad configuration
    #[error(transparent)]
    Environment(#[from] storefront_common::Error),

    #[error("Browser error during {operation}: {message}")]
    Browser { operation: String, message: String },

    #[error("Timed out after {millis}ms during {operation}")]
    Timeout { operation: String, millis: u64 },

    #[error("Driver protocol error: {0}")]
    Protocol(String),

    #[error("Sanitized DOM still contains {scripts} script(s) and {stylesheets} external stylesheet(s)")]
    NotSanitized { scripts: usize, stylesheets: usize },

    #[error("Invalid report path {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    /// A required runtime dependency is missing; nothing was attempted
    pub fn is_environment(&self) -> bool {
        matches!(self, ReportError::Environment(e) if e.is_environment())
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        1
    }

    pub(crate) fn browser(operation: &str, message: impl Into<String>) -> Self {
        ReportError::Browser {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
