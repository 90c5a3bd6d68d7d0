//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the success document of `deployment destroy`.

use anyhow::{Context, Result};

use crate::domain::deployment::DestroyOutcome;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the result of a completed destroy batch.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_destroy_outcome(outcome: &DestroyOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("JSON serialization failed")
}
