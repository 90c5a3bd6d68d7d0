//! JSON bodies exchanged with the deployment directory server.

use serde::{Deserialize, Serialize};

use crate::deployment::{ApplicationRef, DeploymentRecord};

/// Body of `GET /v1/deployments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDeploymentResponse {
    pub deployment: DeploymentRecord,
}

/// Body of `GET /v1/projects/{project}/applications/{app}/deployments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDeploymentsResponse {
    #[serde(default)]
    pub deployments: Vec<DeploymentRecord>,
}

/// Body of `GET /v1/projects/{project}/applications`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListApplicationsResponse {
    #[serde(default)]
    pub applications: Vec<ApplicationRef>,
}

/// Body of `POST .../deployments/{id}/destroy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestroyDeploymentRequest {
    pub deployment: DeploymentRecord,
}
