//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is constructed once in `Cli::run()` and carries the output
//! context, config store, interaction mode and the process-wide cancellation
//! token.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::application::ports::ConfigStore;
use crate::domain::config::SkiffConfig;
use crate::infra::config::{YamlConfigStore, apply_env_overrides};
use crate::infra::directory::{DirectoryConfig, HttpDirectoryClient};
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Answer yes to confirmation prompts (also set by `SKIFF_YES`).
    pub yes: bool,
}

/// Per-invocation overrides of configured values.
#[derive(Default)]
pub struct ScopeFlags {
    pub project: Option<String>,
    pub workspace: Option<String>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
    /// Project/workspace overrides.
    pub scope: ScopeFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Configuration persistence.
    pub config_store: YamlConfigStore,
    /// Answer every confirmation with yes (`--yes` / `-y` or `SKIFF_YES`).
    pub assume_yes: bool,
    /// Never prompt; set by `assume_yes` or the `CI` environment variable.
    pub non_interactive: bool,
    /// Cancelled on Ctrl-C; passed into every directory call.
    pub cancel: CancellationToken,
    scope: ScopeFlags,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags, cancel: CancellationToken) -> Self {
        let assume_yes = flags.behaviour.yes || std::env::var("SKIFF_YES").is_ok();
        let non_interactive = assume_yes || std::env::var("CI").is_ok();

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        // JSON documents own stdout; progress notices would corrupt them.
        let quiet = flags.output.quiet || flags.output.json;

        Self {
            output: OutputContext::new(flags.output.no_color, quiet),
            mode,
            config_store: YamlConfigStore::new(),
            assume_yes,
            non_interactive,
            cancel,
            scope: flags.scope,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Load the configuration with environment and command-line overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn effective_config(&self) -> Result<SkiffConfig> {
        let mut config = self.config_store.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        if let Some(project) = &self.scope.project {
            config.project = Some(project.clone());
        }
        if let Some(workspace) = &self.scope.workspace {
            config.workspace.clone_from(workspace);
        }
        Ok(config)
    }

    /// Build the directory client for the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no server address is configured or the address is
    /// not a valid URL.
    pub fn directory_client(&self, config: &SkiffConfig) -> Result<HttpDirectoryClient> {
        let directory = DirectoryConfig::from_config(config)?;
        HttpDirectoryClient::new(&directory)
    }

    /// Ask the user for confirmation.
    ///
    /// Returns `true` without prompting under `assume_yes`, and `default`
    /// when otherwise non-interactive (CI).
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
