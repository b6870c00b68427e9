//! PostgreSQL-backed `PatientRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PatientOverrideChanges, PatientRepository, PatientRepositoryError};
use crate::domain::{PatientContext, PatientId, TenantId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{PatientContextRow, PatientOverrideUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::patient_contexts;

/// Diesel-backed implementation of the patient repository port.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PatientRepositoryError {
    map_basic_pool_error(error, PatientRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PatientRepositoryError {
    map_basic_diesel_error(
        error,
        PatientRepositoryError::query,
        PatientRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain patient context.
fn row_to_patient(row: PatientContextRow) -> Result<PatientContext, PatientRepositoryError> {
    let attention_status = row
        .attention_status
        .parse()
        .map_err(|err: crate::domain::UnknownVariant| {
            PatientRepositoryError::query(err.to_string())
        })?;
    let override_color = row
        .override_color
        .map(|raw| raw.parse())
        .transpose()
        .map_err(|err: crate::domain::UnknownVariant| {
            PatientRepositoryError::query(err.to_string())
        })?;

    Ok(PatientContext {
        id: PatientId::from_uuid(row.id),
        tenant_id: TenantId::from_uuid(row.tenant_id),
        display_name: row.display_name,
        attention_status,
        override_color,
        resolved_until: row.resolved_until,
        readiness_probability: row.readiness_probability,
        factor_overrides: row.factor_overrides,
    })
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        patient_id: &PatientId,
    ) -> Result<Option<PatientContext>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = patient_contexts::table
            .filter(
                patient_contexts::id
                    .eq(patient_id.as_uuid())
                    .and(patient_contexts::tenant_id.eq(tenant_id.as_uuid())),
            )
            .select(PatientContextRow::as_select())
            .first::<PatientContextRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_patient).transpose()
    }

    async fn apply_overrides(
        &self,
        tenant_id: &TenantId,
        patient_id: &PatientId,
        changes: &PatientOverrideChanges,
    ) -> Result<bool, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update_row = PatientOverrideUpdate {
            attention_status: changes.attention_status.map(|status| status.as_str()),
            override_color: changes.override_color.map(|color| color.as_str()),
            resolved_until: changes.resolved_until,
            factor_overrides: changes.factor_overrides.as_ref(),
        };

        let updated = diesel::update(
            patient_contexts::table.filter(
                patient_contexts::id
                    .eq(patient_id.as_uuid())
                    .and(patient_contexts::tenant_id.eq(tenant_id.as_uuid())),
            ),
        )
        .set((update_row, patient_contexts::updated_at.eq(Utc::now())))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }
}
