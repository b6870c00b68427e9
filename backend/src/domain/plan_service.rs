//! Plan command service: step answers and notes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    PlanCommand, PlanRepository, PlanRepositoryError, RecordAnswerRequest, RecordAnswerResponse,
    RecordNoteRequest, RecordNoteResponse,
};
use crate::domain::{AnswerMode, Error, PlanStep, StepAnswer, StepId, StepStatus, TenantId};

fn map_repository_error(error: PlanRepositoryError) -> Error {
    match error {
        PlanRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("plan repository unavailable: {message}"))
        }
        PlanRepositoryError::Query { message } => {
            Error::internal(format!("plan repository error: {message}"))
        }
        PlanRepositoryError::AlreadyAnswered { message } => {
            Error::conflict(format!("step already answered: {message}"))
        }
    }
}

/// Plan command service implementing the [`PlanCommand`] driving port.
pub struct PlanCommandService {
    plans: Arc<dyn PlanRepository>,
    clock: Arc<dyn Clock>,
}

impl PlanCommandService {
    /// Create the service over the plan repository and a clock.
    pub fn new(plans: Arc<dyn PlanRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { plans, clock }
    }

    async fn require_step(
        &self,
        tenant_id: &TenantId,
        step_id: &StepId,
    ) -> Result<PlanStep, Error> {
        self.plans
            .find_step(tenant_id, step_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("plan step {step_id} not found")))
    }
}

#[async_trait]
impl PlanCommand for PlanCommandService {
    async fn record_answer(
        &self,
        request: RecordAnswerRequest,
    ) -> Result<RecordAnswerResponse, Error> {
        let step = self.require_step(&request.tenant_id, &request.step_id).await?;
        if !step.status.can_progress_to(StepStatus::Resolved) {
            return Err(Error::conflict(format!(
                "step {} is already {}",
                step.id, step.status
            )));
        }

        let answer = StepAnswer {
            id: Uuid::new_v4(),
            tenant_id: request.tenant_id,
            step_id: request.step_id,
            answer_mode: AnswerMode::Value,
            payload: request.payload,
            recorded_by: request.user_id,
            recorded_at: self.clock.utc(),
        };

        self.plans
            .record_answer(&answer, Some(StepStatus::Resolved))
            .await
            .map_err(map_repository_error)?;

        Ok(RecordAnswerResponse {
            answer_id: answer.id,
            step_id: answer.step_id,
            step_status: StepStatus::Resolved,
        })
    }

    async fn record_note(&self, request: RecordNoteRequest) -> Result<RecordNoteResponse, Error> {
        if request.note.trim().is_empty() {
            return Err(Error::invalid_request("note must not be empty"));
        }
        let step = self.require_step(&request.tenant_id, &request.step_id).await?;

        let answer = StepAnswer {
            id: Uuid::new_v4(),
            tenant_id: request.tenant_id,
            step_id: step.id,
            answer_mode: AnswerMode::Note,
            payload: serde_json::json!({ "note": request.note }),
            recorded_by: request.user_id,
            recorded_at: self.clock.utc(),
        };

        // Notes never advance the step.
        self.plans
            .record_answer(&answer, None)
            .await
            .map_err(map_repository_error)?;

        Ok(RecordNoteResponse {
            answer_id: answer.id,
            step_id: answer.step_id,
        })
    }
}

#[cfg(test)]
#[path = "plan_service_tests.rs"]
mod tests;
