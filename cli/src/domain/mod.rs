//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod deployment;
pub mod error;

pub use config::{
    ServerConfig, SkiffConfig, apply_config_value, validate_config_key, validate_config_value,
};
pub use deployment::{DestroyOutcome, DestroyRequest, WorkspaceScope, is_eligible};
pub use error::{BatchError, ConfigError, DirectoryError};
