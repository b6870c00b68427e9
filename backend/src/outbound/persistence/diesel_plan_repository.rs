//! PostgreSQL-backed `PlanRepository` implementation using Diesel.
//!
//! The answer mutation runs in a single transaction: insert the immutable
//! answer row, advance the step, and close the parent plan when its last
//! step resolves. A partial unique index on resolving answers turns a
//! duplicate into [`PlanRepositoryError::AlreadyAnswered`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{PlanRepository, PlanRepositoryError};
use crate::domain::{
    PatientId, PlanId, PlanStatus, PlanStep, StepAnswer, StepId, StepStatus, TenantId,
};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewStepAnswerRow, PlanStepRow};
use super::pool::{DbPool, PoolError};
use super::schema::{plan_steps, resolution_plans, step_answers};

/// Diesel-backed implementation of the plan repository port.
#[derive(Clone)]
pub struct DieselPlanRepository {
    pool: DbPool,
}

impl DieselPlanRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PlanRepositoryError {
    map_basic_pool_error(error, PlanRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PlanRepositoryError {
    map_basic_diesel_error(
        error,
        PlanRepositoryError::query,
        PlanRepositoryError::connection,
    )
}

/// Transaction-local error distinguishing the duplicate-answer case.
enum TxError {
    Diesel(diesel::result::Error),
    AlreadyAnswered,
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Self::AlreadyAnswered
            }
            other => Self::Diesel(other),
        }
    }
}

fn map_tx_error(error: TxError, step_id: &StepId) -> PlanRepositoryError {
    match error {
        TxError::Diesel(err) => map_diesel_error(err),
        TxError::AlreadyAnswered => {
            PlanRepositoryError::already_answered(format!("step {step_id}"))
        }
    }
}

/// Convert a database row into a validated domain plan step.
fn row_to_step(row: PlanStepRow) -> Result<PlanStep, PlanRepositoryError> {
    let map_variant =
        |err: crate::domain::UnknownVariant| PlanRepositoryError::query(err.to_string());

    Ok(PlanStep {
        id: StepId::from_uuid(row.id),
        plan_id: PlanId::from_uuid(row.plan_id),
        tenant_id: TenantId::from_uuid(row.tenant_id),
        title: row.title,
        step_type: row.step_type.parse().map_err(map_variant)?,
        input_type: row.input_type.parse().map_err(map_variant)?,
        status: row.status.parse().map_err(map_variant)?,
        priority: row.priority,
        position: row.position,
    })
}

#[async_trait]
impl PlanRepository for DieselPlanRepository {
    async fn list_open_steps(
        &self,
        tenant_id: &TenantId,
        patient_id: &PatientId,
    ) -> Result<Vec<PlanStep>, PlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PlanStepRow> = plan_steps::table
            .inner_join(resolution_plans::table)
            .filter(
                resolution_plans::patient_id
                    .eq(patient_id.as_uuid())
                    .and(resolution_plans::status.eq(PlanStatus::Open.as_str()))
                    .and(plan_steps::tenant_id.eq(tenant_id.as_uuid()))
                    .and(plan_steps::status.ne(StepStatus::Resolved.as_str())),
            )
            .order((plan_steps::priority.desc(), plan_steps::position.asc()))
            .select(PlanStepRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_step).collect()
    }

    async fn find_step(
        &self,
        tenant_id: &TenantId,
        step_id: &StepId,
    ) -> Result<Option<PlanStep>, PlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = plan_steps::table
            .filter(
                plan_steps::id
                    .eq(step_id.as_uuid())
                    .and(plan_steps::tenant_id.eq(tenant_id.as_uuid())),
            )
            .select(PlanStepRow::as_select())
            .first::<PlanStepRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_step).transpose()
    }

    async fn record_answer(
        &self,
        answer: &StepAnswer,
        advance_to: Option<StepStatus>,
    ) -> Result<(), PlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewStepAnswerRow {
            id: answer.id,
            tenant_id: *answer.tenant_id.as_uuid(),
            step_id: *answer.step_id.as_uuid(),
            answer_mode: answer.answer_mode.as_str(),
            payload: &answer.payload,
            recorded_by: *answer.recorded_by.as_uuid(),
            recorded_at: answer.recorded_at,
        };
        let step_uuid = *answer.step_id.as_uuid();
        let tenant_uuid = *answer.tenant_id.as_uuid();
        let recorded_at = answer.recorded_at;

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                let step: PlanStepRow = plan_steps::table
                    .filter(
                        plan_steps::id
                            .eq(step_uuid)
                            .and(plan_steps::tenant_id.eq(tenant_uuid)),
                    )
                    .select(PlanStepRow::as_select())
                    .first(conn)
                    .await?;

                diesel::insert_into(step_answers::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;

                if let Some(next_status) = advance_to {
                    diesel::update(plan_steps::table.filter(plan_steps::id.eq(step_uuid)))
                        .set((
                            plan_steps::status.eq(next_status.as_str()),
                            plan_steps::updated_at.eq(recorded_at),
                        ))
                        .execute(conn)
                        .await?;

                    let open_remaining: i64 = plan_steps::table
                        .filter(
                            plan_steps::plan_id
                                .eq(step.plan_id)
                                .and(plan_steps::status.ne(StepStatus::Resolved.as_str())),
                        )
                        .count()
                        .get_result(conn)
                        .await?;

                    if open_remaining == 0 {
                        diesel::update(
                            resolution_plans::table.filter(resolution_plans::id.eq(step.plan_id)),
                        )
                        .set((
                            resolution_plans::status.eq(PlanStatus::Closed.as_str()),
                            resolution_plans::updated_at.eq(recorded_at),
                        ))
                        .execute(conn)
                        .await?;
                    }
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_tx_error(err, &answer.step_id))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn valid_row() -> PlanStepRow {
        PlanStepRow {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            title: "Verify coverage".to_owned(),
            step_type: "verification".to_owned(),
            input_type: "confirmation".to_owned(),
            status: "in_progress".to_owned(),
            priority: 5,
            position: 2,
        }
    }

    #[rstest]
    fn row_conversion_parses_enumerated_columns(valid_row: PlanStepRow) {
        let step = row_to_step(valid_row).expect("valid row converts");
        assert_eq!(step.status, StepStatus::InProgress);
        assert_eq!(step.step_type.as_str(), "verification");
    }

    #[rstest]
    fn row_conversion_rejects_unknown_status(mut valid_row: PlanStepRow) {
        valid_row.status = "abandoned".to_owned();

        let error = row_to_step(valid_row).expect_err("unknown status should fail");
        assert!(matches!(error, PlanRepositoryError::Query { .. }));
    }

    #[rstest]
    fn unique_violation_becomes_already_answered() {
        let violation = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        let step_id = StepId::random();
        let mapped = map_tx_error(TxError::from(violation), &step_id);
        assert!(matches!(
            mapped,
            PlanRepositoryError::AlreadyAnswered { .. }
        ));
        assert!(mapped.to_string().contains(&step_id.to_string()));
    }

    #[rstest]
    fn other_diesel_errors_stay_query_errors() {
        let mapped = map_tx_error(TxError::from(diesel::result::Error::NotFound), &StepId::random());
        assert!(matches!(mapped, PlanRepositoryError::Query { .. }));
    }
}
