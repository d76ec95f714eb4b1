use crate::error::{ApiError, DisplayError};
use reqwest::Method;
use std::io;

/// Helper functions for standardizing error conversions across the codebase
/// Convert reqwest send errors to ApiError with request context
pub fn convert_request_error(
    error: reqwest::Error,
    method: &Method,
    path: &str,
    timeout_secs: u64,
) -> ApiError {
    if error.is_timeout() {
        return convert_timeout_error(path, timeout_secs);
    }
    ApiError::Transport {
        method: method.to_string(),
        path: path.to_string(),
        message: error.to_string(),
    }
}

/// Convert timeout errors to ApiError with endpoint context
pub fn convert_timeout_error(path: &str, timeout_secs: u64) -> ApiError {
    ApiError::Timeout {
        path: path.to_string(),
        timeout_secs,
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: impl std::fmt::Display, path: &str) -> ApiError {
    ApiError::Decode {
        path: path.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}

/// Convert IO errors to DisplayError for terminal operations
pub fn convert_io_to_display_error(error: io::Error, operation: &str) -> DisplayError {
    DisplayError::TerminalOutput(format!("{}: {}", operation, error))
}
