//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `skiff_common` — never from
//! `crate::infra`, `crate::commands`, or `crate::output`.
//!
//! Every directory call takes the caller's [`CancellationToken`]. A call that
//! observes cancellation returns [`DirectoryError::Cancelled`].

use std::path::PathBuf;

use anyhow::Result;
use skiff_common::{ApplicationRef, DeploymentRecord, ListDeploymentsRequest};
use tokio_util::sync::CancellationToken;

use crate::domain::{DirectoryError, SkiffConfig};

// ── Deployment Directory Ports ────────────────────────────────────────────────

/// Read access to the deployment records held by the directory server.
#[allow(async_fn_in_trait)]
pub trait DeploymentDirectory {
    /// Fetch one deployment by id.
    ///
    /// Returns [`DirectoryError::NotFound`] when the id is unknown.
    async fn get_deployment(
        &self,
        cancel: &CancellationToken,
        id: &str,
    ) -> Result<DeploymentRecord, DirectoryError>;

    /// List the deployments matching `request`, in the order the request asks for.
    async fn list_deployments(
        &self,
        cancel: &CancellationToken,
        request: &ListDeploymentsRequest,
    ) -> Result<Vec<DeploymentRecord>, DirectoryError>;
}

/// Destroy operations issued through one application's client.
#[allow(async_fn_in_trait)]
pub trait DeploymentDestroyer {
    /// Tear down the infrastructure behind `deployment`.
    ///
    /// The full record is sent so the server can locate the resources. On
    /// success the server marks the deployment physically destroyed.
    async fn destroy_deploy(
        &self,
        cancel: &CancellationToken,
        deployment: &DeploymentRecord,
    ) -> Result<(), DirectoryError>;
}

/// Hands out application-scoped clients.
pub trait ApplicationClients {
    /// Client bound to a single application.
    type App<'a>: DeploymentDestroyer
    where
        Self: 'a;

    /// Resolve the client for `application`.
    fn app<'a>(&'a self, application: &ApplicationRef) -> Self::App<'a>;
}

/// Supplies the applications belonging to a project.
#[allow(async_fn_in_trait)]
pub trait ApplicationCatalog {
    /// List the applications of `project`, in the server's order.
    async fn list_applications(
        &self,
        cancel: &CancellationToken,
        project: &str,
    ) -> Result<Vec<ApplicationRef>, DirectoryError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit a summary line ahead of a group of steps.
    fn header(&self, message: &str);
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit an error message. Never suppressed by quiet mode.
    fn error(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the configuration, returning defaults if no file exists.
    fn load(&self) -> Result<SkiffConfig>;
    /// Persist the given configuration.
    fn save(&self, config: &SkiffConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
