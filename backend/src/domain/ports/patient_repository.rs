//! Port for patient context reads and the override mutation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AttentionStatus, DisplayColor, PatientContext, PatientId, TenantId};

use super::define_port_error;

/// Partial update applied by the status-change/override endpoint. `None`
/// fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatientOverrideChanges {
    pub attention_status: Option<AttentionStatus>,
    pub override_color: Option<DisplayColor>,
    pub resolved_until: Option<DateTime<Utc>>,
    pub factor_overrides: Option<serde_json::Value>,
}

impl PatientOverrideChanges {
    /// Whether the update would change anything at all.
    pub fn is_empty(&self) -> bool {
        self.attention_status.is_none()
            && self.override_color.is_none()
            && self.resolved_until.is_none()
            && self.factor_overrides.is_none()
    }
}

define_port_error! {
    /// Errors raised by patient repository adapters.
    pub enum PatientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "patient repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "patient repository query failed: {message}",
    }
}

/// Port for reading patient context snapshots and applying overrides.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Find a patient context by id within a tenant.
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        patient_id: &PatientId,
    ) -> Result<Option<PatientContext>, PatientRepositoryError>;

    /// Apply a partial override update. Returns `false` when the patient
    /// does not exist in the tenant.
    async fn apply_overrides(
        &self,
        tenant_id: &TenantId,
        patient_id: &PatientId,
        changes: &PatientOverrideChanges,
    ) -> Result<bool, PatientRepositoryError>;
}

/// Fixture implementation for tests and pool-less deployments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientRepository;

#[async_trait]
impl PatientRepository for FixturePatientRepository {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        patient_id: &PatientId,
    ) -> Result<Option<PatientContext>, PatientRepositoryError> {
        Ok(Some(PatientContext {
            id: *patient_id,
            tenant_id: *tenant_id,
            display_name: "Fixture Patient".to_owned(),
            attention_status: AttentionStatus::Normal,
            override_color: None,
            resolved_until: None,
            readiness_probability: 0.9,
            factor_overrides: serde_json::json!({}),
        }))
    }

    async fn apply_overrides(
        &self,
        _tenant_id: &TenantId,
        _patient_id: &PatientId,
        _changes: &PatientOverrideChanges,
    ) -> Result<bool, PatientRepositoryError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_returns_a_patient_for_any_id() {
        let repo = FixturePatientRepository;
        let found = repo
            .find_by_id(&TenantId::random(), &PatientId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_some());
    }
}
