//! Driving port for patient status-change and override mutations.

use async_trait::async_trait;

use crate::domain::{Error, PatientId, TenantId, UserId};

use super::patient_repository::PatientOverrideChanges;

/// Request to apply a partial override update to a patient.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOverridesRequest {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub patient_id: PatientId,
    pub changes: PatientOverrideChanges,
}

/// Outcome of an override update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOverridesResponse {
    pub patient_id: PatientId,
}

/// Port for the status-change/override mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientCommand: Send + Sync {
    /// Apply the provided override fields to a patient context.
    async fn apply_overrides(
        &self,
        request: ApplyOverridesRequest,
    ) -> Result<ApplyOverridesResponse, Error>;
}

/// Fixture implementation acknowledging every mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientCommand;

#[async_trait]
impl PatientCommand for FixturePatientCommand {
    async fn apply_overrides(
        &self,
        request: ApplyOverridesRequest,
    ) -> Result<ApplyOverridesResponse, Error> {
        Ok(ApplyOverridesResponse {
            patient_id: request.patient_id,
        })
    }
}
