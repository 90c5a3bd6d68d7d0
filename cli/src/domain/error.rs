//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Directory errors ──────────────────────────────────────────────────────────

/// Errors returned by calls to the deployment directory server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("Deployment '{id}' not found.")]
    NotFound { id: String },

    #[error("directory request failed: {0}")]
    Transport(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl DirectoryError {
    /// Stable machine-readable code used by JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Transport(_) => "transport",
            Self::Cancelled => "cancelled",
        }
    }
}

// ── Batch errors ──────────────────────────────────────────────────────────────

/// Why a destroy batch ended in the failed state.
///
/// `Display` is the underlying directory error, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// Resolution failed; no destroy call was issued.
    #[error(transparent)]
    Resolve(DirectoryError),

    /// The destroy call for `id` failed; later records were left untouched.
    #[error("{source}")]
    Destroy {
        id: String,
        #[source]
        source: DirectoryError,
    },
}

impl BatchError {
    /// The directory error that stopped the batch.
    #[must_use]
    pub fn directory_error(&self) -> &DirectoryError {
        match self {
            Self::Resolve(e) | Self::Destroy { source: e, .. } => e,
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },

    #[error("No server address configured. Set one with: skiff config set server.address <url>")]
    MissingServerAddress,

    #[error("No project configured. Pass --project or run: skiff config set project <name>")]
    MissingProject,
}
