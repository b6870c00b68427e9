//! Driving port for step answers and notes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, PatientId, StepId, StepStatus, TenantId, UserId};

/// Request to record a resolving answer for an open step.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordAnswerRequest {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub patient_id: PatientId,
    pub step_id: StepId,
    pub payload: serde_json::Value,
}

/// Outcome of recording an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordAnswerResponse {
    pub answer_id: Uuid,
    pub step_id: StepId,
    pub step_status: StepStatus,
}

/// Request to attach a free-text note to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordNoteRequest {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub patient_id: PatientId,
    pub step_id: StepId,
    pub note: String,
}

/// Outcome of recording a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordNoteResponse {
    pub answer_id: Uuid,
    pub step_id: StepId,
}

/// Port for the answer and note mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanCommand: Send + Sync {
    /// Record an immutable answer and resolve the step. A second resolving
    /// answer for the same step is a conflict.
    async fn record_answer(
        &self,
        request: RecordAnswerRequest,
    ) -> Result<RecordAnswerResponse, Error>;

    /// Record a note against a step without advancing it.
    async fn record_note(&self, request: RecordNoteRequest) -> Result<RecordNoteResponse, Error>;
}

/// Fixture implementation acknowledging every mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlanCommand;

#[async_trait]
impl PlanCommand for FixturePlanCommand {
    async fn record_answer(
        &self,
        request: RecordAnswerRequest,
    ) -> Result<RecordAnswerResponse, Error> {
        Ok(RecordAnswerResponse {
            answer_id: Uuid::new_v4(),
            step_id: request.step_id,
            step_status: StepStatus::Resolved,
        })
    }

    async fn record_note(&self, request: RecordNoteRequest) -> Result<RecordNoteResponse, Error> {
        Ok(RecordNoteResponse {
            answer_id: Uuid::new_v4(),
            step_id: request.step_id,
        })
    }
}
