//! PostgreSQL-backed `MilestoneRepository` implementation using Diesel.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{MilestoneRepository, MilestoneRepositoryError};
use crate::domain::{
    Milestone, MilestoneHistoryEntry, MilestoneId, MilestoneWithLatest, PatientId, TenantId,
};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{MilestoneHistoryRow, MilestoneRow};
use super::pool::{DbPool, PoolError};
use super::schema::{milestone_history, milestones};

/// Diesel-backed implementation of the milestone repository port.
#[derive(Clone)]
pub struct DieselMilestoneRepository {
    pool: DbPool,
}

impl DieselMilestoneRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MilestoneRepositoryError {
    map_basic_pool_error(error, MilestoneRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MilestoneRepositoryError {
    map_basic_diesel_error(
        error,
        MilestoneRepositoryError::query,
        MilestoneRepositoryError::connection,
    )
}

fn row_to_milestone(row: MilestoneRow) -> Result<Milestone, MilestoneRepositoryError> {
    let map_variant =
        |err: crate::domain::UnknownVariant| MilestoneRepositoryError::query(err.to_string());

    Ok(Milestone {
        id: MilestoneId::from_uuid(row.id),
        tenant_id: TenantId::from_uuid(row.tenant_id),
        patient_id: PatientId::from_uuid(row.patient_id),
        kind: row.kind.parse().map_err(map_variant)?,
        status: row.status.parse().map_err(map_variant)?,
        occurred_at: row.occurred_at,
    })
}

fn row_to_history(
    row: MilestoneHistoryRow,
) -> Result<MilestoneHistoryEntry, MilestoneRepositoryError> {
    Ok(MilestoneHistoryEntry {
        id: row.id,
        milestone_id: MilestoneId::from_uuid(row.milestone_id),
        status: row
            .status
            .parse()
            .map_err(|err: crate::domain::UnknownVariant| {
                MilestoneRepositoryError::query(err.to_string())
            })?,
        note: row.note,
        recorded_at: row.recorded_at,
    })
}

/// Keep only the newest history row per milestone.
///
/// Rows must arrive ordered by `recorded_at` descending so the first row
/// seen for a milestone wins.
fn latest_by_milestone(
    rows: Vec<MilestoneHistoryRow>,
) -> Result<HashMap<Uuid, MilestoneHistoryEntry>, MilestoneRepositoryError> {
    let mut latest = HashMap::new();
    for row in rows {
        let key = row.milestone_id;
        if !latest.contains_key(&key) {
            latest.insert(key, row_to_history(row)?);
        }
    }
    Ok(latest)
}

#[async_trait]
impl MilestoneRepository for DieselMilestoneRepository {
    async fn list_for_patient(
        &self,
        tenant_id: &TenantId,
        patient_id: &PatientId,
    ) -> Result<Vec<MilestoneWithLatest>, MilestoneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let milestone_rows: Vec<MilestoneRow> = milestones::table
            .filter(
                milestones::patient_id
                    .eq(patient_id.as_uuid())
                    .and(milestones::tenant_id.eq(tenant_id.as_uuid())),
            )
            .order(milestones::created_at.asc())
            .select(MilestoneRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let milestone_ids: Vec<Uuid> = milestone_rows.iter().map(|row| row.id).collect();
        let history_rows: Vec<MilestoneHistoryRow> = milestone_history::table
            .filter(milestone_history::milestone_id.eq_any(&milestone_ids))
            .order(milestone_history::recorded_at.desc())
            .select(MilestoneHistoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut latest = latest_by_milestone(history_rows)?;

        milestone_rows
            .into_iter()
            .map(|row| {
                let key = row.id;
                Ok(MilestoneWithLatest {
                    milestone: row_to_milestone(row)?,
                    latest: latest.remove(&key),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn history_row(milestone_id: Uuid, age_minutes: i64, note: &str) -> MilestoneHistoryRow {
        MilestoneHistoryRow {
            id: Uuid::new_v4(),
            milestone_id,
            status: "reached".to_owned(),
            note: Some(note.to_owned()),
            recorded_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[test]
    fn latest_keeps_the_first_row_per_milestone() {
        let milestone_id = Uuid::new_v4();
        let other_id = Uuid::new_v4();
        // Ordered newest first, as the query produces them.
        let rows = vec![
            history_row(milestone_id, 1, "newest"),
            history_row(milestone_id, 60, "older"),
            history_row(other_id, 5, "other"),
        ];

        let latest = latest_by_milestone(rows).expect("valid rows convert");
        assert_eq!(latest.len(), 2);
        assert_eq!(
            latest
                .get(&milestone_id)
                .and_then(|entry| entry.note.as_deref()),
            Some("newest")
        );
    }

    #[test]
    fn unknown_history_status_is_rejected() {
        let mut row = history_row(Uuid::new_v4(), 1, "note");
        row.status = "imagined".to_owned();

        let error = latest_by_milestone(vec![row]).expect_err("unknown status should fail");
        assert!(matches!(error, MilestoneRepositoryError::Query { .. }));
    }
}
