//! Port for resolution plan and step persistence.

use async_trait::async_trait;

use crate::domain::{PatientId, PlanStep, StepAnswer, StepId, StepStatus, TenantId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by plan repository adapters.
    pub enum PlanRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "plan repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "plan repository query failed: {message}",
        /// The step already carries a resolving answer.
        AlreadyAnswered { message: String } =>
            "step already answered: {message}",
    }
}

/// Port for reading plan steps and recording answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// List the open steps of the patient's open plans, highest priority
    /// first, then plan position.
    async fn list_open_steps(
        &self,
        tenant_id: &TenantId,
        patient_id: &PatientId,
    ) -> Result<Vec<PlanStep>, PlanRepositoryError>;

    /// Find a single step by id within a tenant.
    async fn find_step(
        &self,
        tenant_id: &TenantId,
        step_id: &StepId,
    ) -> Result<Option<PlanStep>, PlanRepositoryError>;

    /// Record an answer and, when `advance_to` is set, progress the step's
    /// status in the same transaction. Closing the parent plan when its last
    /// step resolves also happens inside that transaction.
    ///
    /// Returns [`PlanRepositoryError::AlreadyAnswered`] when a resolving
    /// answer already exists for the step.
    async fn record_answer(
        &self,
        answer: &StepAnswer,
        advance_to: Option<StepStatus>,
    ) -> Result<(), PlanRepositoryError>;
}

/// Fixture implementation with no plans on file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlanRepository;

#[async_trait]
impl PlanRepository for FixturePlanRepository {
    async fn list_open_steps(
        &self,
        _tenant_id: &TenantId,
        _patient_id: &PatientId,
    ) -> Result<Vec<PlanStep>, PlanRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_step(
        &self,
        _tenant_id: &TenantId,
        _step_id: &StepId,
    ) -> Result<Option<PlanStep>, PlanRepositoryError> {
        Ok(None)
    }

    async fn record_answer(
        &self,
        _answer: &StepAnswer,
        _advance_to: Option<StepStatus>,
    ) -> Result<(), PlanRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_has_no_open_steps() {
        let repo = FixturePlanRepository;
        let steps = repo
            .list_open_steps(&TenantId::random(), &PatientId::random())
            .await
            .expect("fixture list succeeds");
        assert!(steps.is_empty());
    }

    #[test]
    fn already_answered_formats_step_context() {
        let err = PlanRepositoryError::already_answered("step 42");
        assert!(err.to_string().contains("step 42"));
    }
}
