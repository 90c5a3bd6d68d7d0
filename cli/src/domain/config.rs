//! Domain types and validators for Skiff configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use skiff_common::DEFAULT_WORKSPACE;

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "server.address",
    "server.token",
    "server.timeout_secs",
    "project",
    "workspace",
];

const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.skiff/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkiffConfig {
    /// Directory server connection settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Project whose applications are managed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Workspace deployments are listed in.
    #[serde(default = "default_workspace")]
    pub workspace: String,
}

/// Directory server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL, e.g. `https://skiff.example.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Bearer token sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Per-request transport timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SkiffConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            project: None,
            workspace: default_workspace(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_workspace() -> String {
    DEFAULT_WORKSPACE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let hint = match key {
        "server.address" if !is_http_url(value) => "Address must start with http:// or https://",
        "server.timeout_secs" if !matches!(value.parse::<u64>(), Ok(n) if n > 0) => {
            "Timeout must be a positive number of seconds"
        }
        "project" | "workspace" if !is_valid_name(value) => {
            "Names may only contain letters, digits, '-', '_' and '.'"
        }
        "server.token" if value.trim().is_empty() => "Token must not be empty",
        _ => return Ok(()),
    };
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    }
    .into())
}

/// Apply a validated `key = value` pair to the config.
///
/// # Errors
///
/// Returns an error if the key or value fails validation.
pub fn apply_config_value(config: &mut SkiffConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "server.address" => config.server.address = Some(value.trim_end_matches('/').to_string()),
        "server.token" => config.server.token = Some(value.to_string()),
        "server.timeout_secs" => config.server.timeout_secs = value.parse()?,
        "project" => config.project = Some(value.to_string()),
        "workspace" => config.workspace = value.to_string(),
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

fn is_valid_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
