//! Port for milestone reads with latest history.

use async_trait::async_trait;

use crate::domain::{MilestoneWithLatest, PatientId, TenantId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by milestone repository adapters.
    pub enum MilestoneRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "milestone repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "milestone repository query failed: {message}",
    }
}

/// Port for reading a patient's milestones joined with their most recent
/// history entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MilestoneRepository: Send + Sync {
    /// List milestones for a patient in journey order (creation order).
    async fn list_for_patient(
        &self,
        tenant_id: &TenantId,
        patient_id: &PatientId,
    ) -> Result<Vec<MilestoneWithLatest>, MilestoneRepositoryError>;
}

/// Fixture implementation with no milestones on file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMilestoneRepository;

#[async_trait]
impl MilestoneRepository for FixtureMilestoneRepository {
    async fn list_for_patient(
        &self,
        _tenant_id: &TenantId,
        _patient_id: &PatientId,
    ) -> Result<Vec<MilestoneWithLatest>, MilestoneRepositoryError> {
        Ok(Vec::new())
    }
}
