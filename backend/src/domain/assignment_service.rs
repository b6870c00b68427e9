//! Assignment service: assign, assign-bulk, and own.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    AssignBulkRequest, AssignBulkResponse, AssignRequest, AssignResponse, AssignmentCommand,
    OwnRequest, OwnedTaskRepository, OwnedTaskRepositoryError, PlanRepository,
    PlanRepositoryError,
};
use crate::domain::{
    Error, OwnedTask, OwnedTaskId, OwnedTaskStatus, StepId, TenantId, UserId,
};

fn map_plan_error(error: PlanRepositoryError) -> Error {
    match error {
        PlanRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("plan repository unavailable: {message}"))
        }
        PlanRepositoryError::Query { message } | PlanRepositoryError::AlreadyAnswered { message } => {
            Error::internal(format!("plan repository error: {message}"))
        }
    }
}

fn map_owned_task_error(error: OwnedTaskRepositoryError) -> Error {
    match error {
        OwnedTaskRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("owned task repository unavailable: {message}"))
        }
        OwnedTaskRepositoryError::Query { message } => {
            Error::internal(format!("owned task repository error: {message}"))
        }
    }
}

/// Assignment service implementing the [`AssignmentCommand`] driving port.
pub struct AssignmentService {
    plans: Arc<dyn PlanRepository>,
    owned_tasks: Arc<dyn OwnedTaskRepository>,
    clock: Arc<dyn Clock>,
}

impl AssignmentService {
    /// Create the service over its repositories and a clock.
    pub fn new(
        plans: Arc<dyn PlanRepository>,
        owned_tasks: Arc<dyn OwnedTaskRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            plans,
            owned_tasks,
            clock,
        }
    }

    async fn claim_step(
        &self,
        tenant_id: TenantId,
        step_id: StepId,
        owner: UserId,
        actor: UserId,
        status: OwnedTaskStatus,
    ) -> Result<AssignResponse, Error> {
        self.plans
            .find_step(&tenant_id, &step_id)
            .await
            .map_err(map_plan_error)?
            .ok_or_else(|| Error::not_found(format!("plan step {step_id} not found")))?;

        let now = self.clock.utc();
        let task = OwnedTask {
            id: OwnedTaskId::random(),
            tenant_id,
            owner_user_id: owner,
            step_id,
            status,
            actor_user_id: actor,
            created_at: now,
            updated_at: now,
        };
        self.owned_tasks
            .upsert(&task)
            .await
            .map_err(map_owned_task_error)?;

        Ok(AssignResponse {
            task_id: task.id,
            step_id,
            status,
        })
    }
}

#[async_trait]
impl AssignmentCommand for AssignmentService {
    async fn assign(&self, request: AssignRequest) -> Result<AssignResponse, Error> {
        self.claim_step(
            request.tenant_id,
            request.step_id,
            request.assignee_user_id,
            request.actor_user_id,
            OwnedTaskStatus::Assigned,
        )
        .await
    }

    async fn assign_bulk(&self, request: AssignBulkRequest) -> Result<AssignBulkResponse, Error> {
        // An empty target list is an explicit no-op.
        let mut assigned = 0;
        for step_id in request.step_ids {
            self.claim_step(
                request.tenant_id,
                step_id,
                request.assignee_user_id,
                request.actor_user_id,
                OwnedTaskStatus::Assigned,
            )
            .await?;
            assigned += 1;
        }
        Ok(AssignBulkResponse { assigned })
    }

    async fn own(&self, request: OwnRequest) -> Result<AssignResponse, Error> {
        self.claim_step(
            request.tenant_id,
            request.step_id,
            request.user_id,
            request.user_id,
            OwnedTaskStatus::Claimed,
        )
        .await
    }
}

#[cfg(test)]
#[path = "assignment_service_tests.rs"]
mod tests;
