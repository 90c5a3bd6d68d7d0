use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the workspace used when none is configured.
pub const DEFAULT_WORKSPACE: &str = "default";

/// Outcome of the operation that produced a deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    #[default]
    Unknown,
    Pending,
    Running,
    Success,
    Error,
}

/// Whether the infrastructure backing a deployment still exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhysicalState {
    #[default]
    Unknown,
    Pending,
    Created,
    Destroyed,
}

impl PhysicalState {
    /// Wire name used in query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Pending => "PENDING",
            Self::Created => "CREATED",
            Self::Destroyed => "DESTROYED",
        }
    }
}

/// Identifies an application inside a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ApplicationRef {
    pub project: String,
    pub application: String,
}

impl ApplicationRef {
    pub fn new(project: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            application: application.into(),
        }
    }
}

impl fmt::Display for ApplicationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.application)
    }
}

/// Identifies a workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WorkspaceRef {
    pub workspace: String,
}

impl WorkspaceRef {
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

impl Default for WorkspaceRef {
    fn default() -> Self {
        Self::new(DEFAULT_WORKSPACE)
    }
}

impl fmt::Display for WorkspaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.workspace)
    }
}

/// One deployed instance of an application, as stored by the directory server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentRecord {
    /// Opaque identifier, unique within a workspace.
    pub id: String,
    pub application: ApplicationRef,
    #[serde(default)]
    pub workspace: WorkspaceRef,
    /// Per-application deploy counter assigned by the server.
    #[serde(default)]
    pub sequence: u64,
    #[serde(default)]
    pub lifecycle_state: LifecycleState,
    #[serde(default)]
    pub physical_state: PhysicalState,
    /// When the deploy operation finished. `None` while still running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Field a deployment listing is sorted by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderBy {
    #[default]
    Unset,
    StartTime,
    CompleteTime,
}

impl OrderBy {
    /// Wire name used in query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "UNSET",
            Self::StartTime => "START_TIME",
            Self::CompleteTime => "COMPLETE_TIME",
        }
    }
}

/// Sort order requested from the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OperationOrder {
    pub order: OrderBy,
    pub desc: bool,
}

/// Filter for listing the deployments of one application in one workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListDeploymentsRequest {
    pub application: ApplicationRef,
    pub workspace: WorkspaceRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_state: Option<PhysicalState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OperationOrder>,
}

impl ListDeploymentsRequest {
    /// Deployments whose infrastructure still exists, latest-completed first.
    #[must_use]
    pub fn created_latest_first(application: ApplicationRef, workspace: WorkspaceRef) -> Self {
        Self {
            application,
            workspace,
            physical_state: Some(PhysicalState::Created),
            order: Some(OperationOrder {
                order: OrderBy::CompleteTime,
                desc: true,
            }),
        }
    }
}
