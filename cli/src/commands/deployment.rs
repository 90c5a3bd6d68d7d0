//! `skiff deployment destroy [--force] [--app NAME] [ID...]` — tear down deployments.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};
use skiff_common::WorkspaceRef;

use crate::app::AppContext;
use crate::application::services::deployment_destroy::{destroy_deployments, workspace_scope};
use crate::domain::config::validate_config_value;
use crate::domain::deployment::{DestroyRequest, WorkspaceScope};
use crate::domain::error::{BatchError, ConfigError, DirectoryError};
use crate::output::{TerminalReporter, json};

/// Deployment subcommands.
#[derive(Subcommand)]
pub enum DeploymentCommand {
    /// Destroy one or more deployments
    ///
    /// Destroy one or more deployments. This will "undeploy" this specific
    /// instance of an application.
    ///
    /// When no ids are given, this will default to destroying ALL deployments
    /// in the workspace whose resources still exist. This requires
    /// interactive confirmation unless --force is specified.
    Destroy(DestroyArgs),
}

/// Arguments for `deployment destroy`.
#[derive(Args)]
pub struct DestroyArgs {
    /// Yes to all confirmations
    #[arg(long)]
    pub force: bool,

    /// Only sweep this application when no ids are given
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,

    /// Deployment ids to destroy, in order
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,
}

/// Run a deployment subcommand.
///
/// # Errors
///
/// Returns an error if configuration is missing or invalid. Directory
/// failures are rendered and reported through the exit code.
pub async fn run(app: &AppContext, cmd: DeploymentCommand) -> Result<ExitCode> {
    match cmd {
        DeploymentCommand::Destroy(args) => destroy(app, args).await,
    }
}

async fn destroy(app: &AppContext, args: DestroyArgs) -> Result<ExitCode> {
    let request = DestroyRequest::from_ids(args.ids);
    let config = app.effective_config()?;
    validate_config_value("workspace", &config.workspace)?;
    let workspace = WorkspaceRef::new(config.workspace.clone());

    if request.is_all() && !args.force {
        let prompt = format!("Destroy ALL deployments in workspace '{workspace}'?");
        if !app.confirm(&prompt, false)? {
            if !app.output.quiet {
                println!("Cancelled.");
            }
            return Ok(ExitCode::SUCCESS);
        }
    }

    let client = app.directory_client(&config)?;

    let scope = if request.is_all() {
        let project = config
            .project
            .as_deref()
            .ok_or(ConfigError::MissingProject)?;
        match workspace_scope(&client, &app.cancel, project, workspace, args.app.as_deref()).await
        {
            Ok(scope) => scope,
            Err(e) => return report_failure(app, &e),
        }
    } else {
        WorkspaceScope {
            workspace,
            applications: Vec::new(),
        }
    };

    let reporter = TerminalReporter::new(&app.output);
    match destroy_deployments(&client, &client, &reporter, &app.cancel, &request, &scope).await {
        Ok(outcome) => {
            if app.is_json() {
                println!("{}", json::format_destroy_outcome(&outcome)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(BatchError::Resolve(e)) => report_failure(app, &e),
        // The service already printed the error notice for this one.
        Err(BatchError::Destroy { source, .. }) => {
            if app.is_json() {
                println!("{}", json::format_error(&source.to_string(), source.code())?);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn report_failure(app: &AppContext, err: &DirectoryError) -> Result<ExitCode> {
    if app.is_json() {
        println!("{}", json::format_error(&err.to_string(), err.code())?);
    } else {
        app.output.error(&err.to_string());
    }
    Ok(ExitCode::FAILURE)
}
