//! `skiff config` — show and set configuration values.

use anyhow::Result;
use std::process::ExitCode;

use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the config cannot be read, validated, or written.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;

    if app.is_json() {
        let mut value = serde_json::to_value(&config)?;
        if let Some(token) = value.pointer_mut("/server/token") {
            let masked = mask(token.as_str().unwrap_or_default());
            *token = serde_json::Value::String(masked);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(ExitCode::SUCCESS);
    }

    app.output.header(&format!("Configuration ({})", path.display()));
    app.output.kv(
        "server.address:",
        config.server.address.as_deref().unwrap_or("(not set)"),
    );
    app.output.kv(
        "server.token:",
        &config
            .server
            .token
            .as_deref()
            .map_or_else(|| "(not set)".to_string(), mask),
    );
    app.output
        .kv("server.timeout_secs:", &config.server.timeout_secs.to_string());
    app.output
        .kv("project:", config.project.as_deref().unwrap_or("(not set)"));
    app.output.kv("workspace:", &config.workspace);
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    config_service::set_config_value(&app.config_store, key, value)?;
    let shown = if key == "server.token" {
        mask(value)
    } else {
        value.to_string()
    };
    app.output.success(&format!("Set {key} = {shown}"));
    Ok(ExitCode::SUCCESS)
}

/// Keep the first four characters of a secret.
fn mask(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}****")
}
