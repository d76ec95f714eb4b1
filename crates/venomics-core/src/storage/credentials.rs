//! API key resolution
//!
//! The key comes from the VENOMICS_API_KEY environment variable, or from a
//! hidden interactive prompt when stdin is a terminal. Nothing is persisted.

use crate::error::{AuthError, StorageError};
use std::env;

pub const API_KEY_ENV: &str = "VENOMICS_API_KEY";

/// Returns VENOMICS_API_KEY if set and non-empty.
pub fn get_api_key() -> Option<String> {
    env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

pub fn has_api_key() -> bool {
    get_api_key().is_some()
}

/// Ask for the key without echoing it.
pub fn prompt_api_key() -> Result<String, StorageError> {
    let key = rpassword::prompt_password("Venomics API key: ").map_err(|source| {
        StorageError::FileIo {
            path: "<stdin>".to_string(),
            source,
        }
    })?;
    Ok(key.trim().to_string())
}

/// Explicit key, then environment, then prompt (interactive sessions only).
pub fn resolve_api_key(explicit: Option<String>) -> crate::Result<String> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        return Ok(key);
    }
    if let Some(key) = get_api_key() {
        return Ok(key);
    }
    if atty::is(atty::Stream::Stdin) {
        let key = prompt_api_key()?;
        if !key.is_empty() {
            return Ok(key);
        }
    }
    Err(AuthError::MissingApiKey.into())
}
