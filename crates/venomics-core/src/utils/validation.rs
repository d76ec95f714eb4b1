//! Input validation for user-supplied settings.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Parse a `key=value` query parameter.
pub fn parse_parameter(raw: &str) -> crate::Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidArguments(format!(
            "Invalid parameter '{}': expected key=value",
            raw
        ))
        .into()),
    }
}

/// Reject zero for settings that must be positive.
pub fn validate_positive(field: &str, value: u64) -> crate::Result<()> {
    if value == 0 {
        return Err(CliError::InvalidArguments(format!("{} must be greater than zero", field)).into());
    }
    Ok(())
}
