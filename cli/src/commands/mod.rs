//! Command implementations

pub mod config;
pub mod deployment;
pub mod version;
