//! Application service — batch deployment destroy use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! The batch runs `Resolving → Destroying → Done | Failed`. Calls are issued
//! one at a time; the first failure ends the batch and nothing already
//! destroyed is rolled back.

use skiff_common::{ApplicationRef, DeploymentRecord, ListDeploymentsRequest, WorkspaceRef};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::ports::{
    ApplicationCatalog, ApplicationClients, DeploymentDestroyer, DeploymentDirectory,
    ProgressReporter,
};
use crate::domain::deployment::{DestroyOutcome, DestroyRequest, WorkspaceScope, is_eligible};
use crate::domain::error::{BatchError, DirectoryError};

/// Build the scope an enumeration sweep covers.
///
/// With `app_filter` set the scope is that one application and the catalog is
/// not consulted.
///
/// # Errors
///
/// Returns the catalog's error if the application list cannot be fetched.
pub async fn workspace_scope(
    catalog: &impl ApplicationCatalog,
    cancel: &CancellationToken,
    project: &str,
    workspace: WorkspaceRef,
    app_filter: Option<&str>,
) -> Result<WorkspaceScope, DirectoryError> {
    let applications = match app_filter {
        Some(app) => vec![ApplicationRef::new(project, app)],
        None => catalog.list_applications(cancel, project).await?,
    };
    debug!(project, workspace = %workspace, apps = applications.len(), "workspace scope");
    Ok(WorkspaceScope {
        workspace,
        applications,
    })
}

/// Turn a destroy request into the ordered records it targets.
///
/// Explicit ids are fetched one by one in the given order. `All` lists every
/// application in scope for deployments still physically created, latest
/// completed first, and concatenates the lists in application order.
///
/// # Errors
///
/// Returns the first directory error encountered; no further calls are made
/// after it.
pub async fn resolve(
    directory: &impl DeploymentDirectory,
    cancel: &CancellationToken,
    request: &DestroyRequest,
    scope: &WorkspaceScope,
) -> Result<Vec<DeploymentRecord>, DirectoryError> {
    let mut result = Vec::new();
    match request {
        DestroyRequest::Explicit(ids) => {
            for id in ids {
                debug!(id = %id, "get deployment");
                result.push(directory.get_deployment(cancel, id).await?);
            }
        }
        DestroyRequest::All => {
            for app in &scope.applications {
                let list = ListDeploymentsRequest::created_latest_first(
                    app.clone(),
                    scope.workspace.clone(),
                );
                debug!(application = %app, workspace = %scope.workspace, "list deployments");
                result.extend(directory.list_deployments(cancel, &list).await?);
            }
        }
    }
    Ok(result)
}

/// Destroy one deployment through its own application's client.
///
/// # Errors
///
/// Returns the error from the destroy call unchanged.
pub async fn destroy_one(
    clients: &impl ApplicationClients,
    cancel: &CancellationToken,
    deployment: &DeploymentRecord,
) -> Result<(), DirectoryError> {
    let app = clients.app(&deployment.application);
    app.destroy_deploy(cancel, deployment).await
}

/// Resolve, filter and destroy deployments, stopping at the first failure.
///
/// Reports the number of resolved candidates (ineligible ones included), then
/// a notice before each destroy call. Records whose deploy did not succeed are
/// skipped without notice.
///
/// # Errors
///
/// Returns [`BatchError::Resolve`] if resolution fails (no destroy call is
/// issued) or [`BatchError::Destroy`] for the first destroy call that fails
/// (later records are left untouched).
pub async fn destroy_deployments(
    directory: &impl DeploymentDirectory,
    clients: &impl ApplicationClients,
    reporter: &impl ProgressReporter,
    cancel: &CancellationToken,
    request: &DestroyRequest,
    scope: &WorkspaceScope,
) -> Result<DestroyOutcome, BatchError> {
    let deployments = resolve(directory, cancel, request, scope)
        .await
        .map_err(BatchError::Resolve)?;

    let mut outcome = DestroyOutcome {
        candidates: deployments.len(),
        destroyed: Vec::new(),
    };
    reporter.header(&format!(
        "{} deployments will be destroyed.",
        outcome.candidates
    ));

    for deployment in &deployments {
        if !is_eligible(deployment) {
            debug!(id = %deployment.id, state = ?deployment.lifecycle_state, "skipping");
            continue;
        }

        reporter.step(&format!("Destroying deployment: {}", deployment.id));
        if let Err(e) = destroy_one(clients, cancel, deployment).await {
            warn!(id = %deployment.id, error = %e, "destroy failed");
            reporter.error(&format!("Error destroying the deployment: {e}"));
            return Err(BatchError::Destroy {
                id: deployment.id.clone(),
                source: e,
            });
        }
        info!(id = %deployment.id, application = %deployment.application, "destroyed");
        outcome.destroyed.push(deployment.id.clone());
    }

    Ok(outcome)
}
