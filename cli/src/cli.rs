//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags, ScopeFlags};
use crate::commands;

/// Manage application deployments
#[derive(Parser)]
#[command(
    name = "skiff",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Assume yes for confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Project to operate on (overrides config)
    #[arg(long, global = true, env = "SKIFF_PROJECT")]
    pub project: Option<String>,

    /// Workspace to operate in (overrides config)
    #[arg(long, global = true, env = "SKIFF_WORKSPACE")]
    pub workspace: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage deployments
    #[command(subcommand, alias = "deploy")]
    Deployment(commands::deployment::DeploymentCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self, cancel: CancellationToken) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            project,
            workspace,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json)?;
            return Ok(ExitCode::SUCCESS);
        }

        let app = AppContext::new(
            AppFlags {
                output: OutputFlags {
                    no_color,
                    quiet,
                    json,
                },
                behaviour: BehaviourFlags { yes },
                scope: ScopeFlags { project, workspace },
            },
            cancel,
        );

        match command {
            Command::Deployment(cmd) => commands::deployment::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => Ok(ExitCode::SUCCESS),
        }
    }
}
