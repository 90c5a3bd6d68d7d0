//! Deployment teardown domain types: what to destroy and what may be destroyed.
//!
//! Pure functions only — no I/O, no async.

use serde::Serialize;
use skiff_common::{ApplicationRef, DeploymentRecord, LifecycleState, WorkspaceRef};

/// What a destroy batch targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyRequest {
    /// These deployment ids, in this order. Duplicates are kept.
    Explicit(Vec<String>),
    /// Every deployment whose infrastructure still exists in the scope.
    All,
}

impl DestroyRequest {
    /// Build a request from positional ids; no ids means [`DestroyRequest::All`].
    #[must_use]
    pub fn from_ids(ids: Vec<String>) -> Self {
        if ids.is_empty() {
            Self::All
        } else {
            Self::Explicit(ids)
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Workspace and applications an [`DestroyRequest::All`] sweep covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceScope {
    pub workspace: WorkspaceRef,
    /// Iterated in this order during enumeration.
    pub applications: Vec<ApplicationRef>,
}

/// Only a deployment that completed successfully has infrastructure worth
/// tearing down.
#[must_use]
pub fn is_eligible(record: &DeploymentRecord) -> bool {
    record.lifecycle_state == LifecycleState::Success
}

/// Result of a batch that reached the done state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DestroyOutcome {
    /// Number of resolved records, eligible or not.
    pub candidates: usize,
    /// Ids destroyed, in call order.
    pub destroyed: Vec<String>,
}
