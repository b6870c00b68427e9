//! Patient command service: status-change and override updates.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    ApplyOverridesRequest, ApplyOverridesResponse, PatientCommand, PatientRepository,
    PatientRepositoryError,
};

fn map_repository_error(error: PatientRepositoryError) -> Error {
    match error {
        PatientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("patient repository unavailable: {message}"))
        }
        PatientRepositoryError::Query { message } => {
            Error::internal(format!("patient repository error: {message}"))
        }
    }
}

/// Patient command service implementing the [`PatientCommand`] driving port.
pub struct PatientCommandService {
    patients: Arc<dyn PatientRepository>,
}

impl PatientCommandService {
    /// Create the service over the patient repository.
    pub fn new(patients: Arc<dyn PatientRepository>) -> Self {
        Self { patients }
    }
}

#[async_trait]
impl PatientCommand for PatientCommandService {
    async fn apply_overrides(
        &self,
        request: ApplyOverridesRequest,
    ) -> Result<ApplyOverridesResponse, Error> {
        if request.changes.is_empty() {
            return Err(Error::invalid_request(
                "at least one override field is required",
            ));
        }

        let found = self
            .patients
            .apply_overrides(&request.tenant_id, &request.patient_id, &request.changes)
            .await
            .map_err(map_repository_error)?;
        if !found {
            return Err(Error::not_found(format!(
                "patient {} not found",
                request.patient_id
            )));
        }

        Ok(ApplyOverridesResponse {
            patient_id: request.patient_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPatientRepository, PatientOverrideChanges};
    use crate::domain::{AttentionStatus, DisplayColor, ErrorCode, PatientId, TenantId, UserId};

    fn request(changes: PatientOverrideChanges) -> ApplyOverridesRequest {
        ApplyOverridesRequest {
            tenant_id: TenantId::random(),
            user_id: UserId::random(),
            patient_id: PatientId::random(),
            changes,
        }
    }

    #[tokio::test]
    async fn empty_changes_are_invalid_without_touching_the_repository() {
        let patients = MockPatientRepository::new();

        let err = PatientCommandService::new(Arc::new(patients))
            .apply_overrides(request(PatientOverrideChanges::default()))
            .await
            .expect_err("empty update rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn applies_provided_fields() {
        let mut patients = MockPatientRepository::new();
        patients
            .expect_apply_overrides()
            .withf(|_, _, changes| {
                changes.attention_status == Some(AttentionStatus::Urgent)
                    && changes.override_color == Some(DisplayColor::Red)
                    && changes.resolved_until.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let changes = PatientOverrideChanges {
            attention_status: Some(AttentionStatus::Urgent),
            override_color: Some(DisplayColor::Red),
            ..PatientOverrideChanges::default()
        };
        PatientCommandService::new(Arc::new(patients))
            .apply_overrides(request(changes))
            .await
            .expect("override applies");
    }

    #[tokio::test]
    async fn unknown_patient_is_not_found() {
        let mut patients = MockPatientRepository::new();
        patients
            .expect_apply_overrides()
            .returning(|_, _, _| Ok(false));

        let changes = PatientOverrideChanges {
            attention_status: Some(AttentionStatus::Watch),
            ..PatientOverrideChanges::default()
        };
        let err = PatientCommandService::new(Arc::new(patients))
            .apply_overrides(request(changes))
            .await
            .expect_err("missing patient");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
