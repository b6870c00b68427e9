//! Driving port for ownership assignment.

use async_trait::async_trait;

use crate::domain::{Error, OwnedTaskId, OwnedTaskStatus, StepId, TenantId, UserId};

/// Request to assign one bottleneck to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignRequest {
    pub tenant_id: TenantId,
    /// Who is performing the assignment.
    pub actor_user_id: UserId,
    /// Who will own the bottleneck.
    pub assignee_user_id: UserId,
    pub step_id: StepId,
}

/// Outcome of a single assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignResponse {
    pub task_id: OwnedTaskId,
    pub step_id: StepId,
    pub status: OwnedTaskStatus,
}

/// Request to assign several bottlenecks to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignBulkRequest {
    pub tenant_id: TenantId,
    pub actor_user_id: UserId,
    pub assignee_user_id: UserId,
    pub step_ids: Vec<StepId>,
}

/// Outcome of a bulk assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignBulkResponse {
    /// How many claims were created or updated. Zero for an empty request.
    pub assigned: usize,
}

/// Request for the session user to claim a bottleneck themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnRequest {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub step_id: StepId,
}

/// Port for assign, assign-bulk, and own mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentCommand: Send + Sync {
    /// Assign ownership of a step to a user.
    async fn assign(&self, request: AssignRequest) -> Result<AssignResponse, Error>;

    /// Assign ownership of several steps to one user. An empty list is a
    /// no-op returning success.
    async fn assign_bulk(&self, request: AssignBulkRequest) -> Result<AssignBulkResponse, Error>;

    /// The session user claims ownership of a step themselves.
    async fn own(&self, request: OwnRequest) -> Result<AssignResponse, Error>;
}

/// Fixture implementation acknowledging every mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAssignmentCommand;

#[async_trait]
impl AssignmentCommand for FixtureAssignmentCommand {
    async fn assign(&self, request: AssignRequest) -> Result<AssignResponse, Error> {
        Ok(AssignResponse {
            task_id: OwnedTaskId::random(),
            step_id: request.step_id,
            status: OwnedTaskStatus::Assigned,
        })
    }

    async fn assign_bulk(&self, request: AssignBulkRequest) -> Result<AssignBulkResponse, Error> {
        Ok(AssignBulkResponse {
            assigned: request.step_ids.len(),
        })
    }

    async fn own(&self, request: OwnRequest) -> Result<AssignResponse, Error> {
        Ok(AssignResponse {
            task_id: OwnedTaskId::random(),
            step_id: request.step_id,
            status: OwnedTaskStatus::Claimed,
        })
    }
}
