//! PostgreSQL-backed `OwnedTaskRepository` implementation using Diesel.
//!
//! The upsert targets the `(tenant_id, step_id)` unique constraint: a step
//! has at most one owner, and re-assignment replaces owner, status, and
//! actor in place.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OwnedTaskRepository, OwnedTaskRepositoryError};
use crate::domain::{OwnedTask, OwnedTaskId, StepId, TenantId, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewOwnedTaskRow, OwnedTaskRow, OwnedTaskUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::user_owned_tasks;

/// Diesel-backed implementation of the owned-task repository port.
#[derive(Clone)]
pub struct DieselOwnedTaskRepository {
    pool: DbPool,
}

impl DieselOwnedTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OwnedTaskRepositoryError {
    map_basic_pool_error(error, OwnedTaskRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OwnedTaskRepositoryError {
    map_basic_diesel_error(
        error,
        OwnedTaskRepositoryError::query,
        OwnedTaskRepositoryError::connection,
    )
}

fn row_to_task(row: OwnedTaskRow) -> Result<OwnedTask, OwnedTaskRepositoryError> {
    Ok(OwnedTask {
        id: OwnedTaskId::from_uuid(row.id),
        tenant_id: TenantId::from_uuid(row.tenant_id),
        owner_user_id: UserId::from_uuid(row.owner_user_id),
        step_id: StepId::from_uuid(row.step_id),
        status: row
            .status
            .parse()
            .map_err(|err: crate::domain::UnknownVariant| {
                OwnedTaskRepositoryError::query(err.to_string())
            })?,
        actor_user_id: UserId::from_uuid(row.actor_user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl OwnedTaskRepository for DieselOwnedTaskRepository {
    async fn list_for_user(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
    ) -> Result<Vec<OwnedTask>, OwnedTaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<OwnedTaskRow> = user_owned_tasks::table
            .filter(
                user_owned_tasks::owner_user_id
                    .eq(user_id.as_uuid())
                    .and(user_owned_tasks::tenant_id.eq(tenant_id.as_uuid())),
            )
            .order(user_owned_tasks::updated_at.desc())
            .select(OwnedTaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_task).collect()
    }

    async fn upsert(&self, task: &OwnedTask) -> Result<(), OwnedTaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewOwnedTaskRow {
            id: *task.id.as_uuid(),
            tenant_id: *task.tenant_id.as_uuid(),
            owner_user_id: *task.owner_user_id.as_uuid(),
            step_id: *task.step_id.as_uuid(),
            status: task.status.as_str(),
            actor_user_id: *task.actor_user_id.as_uuid(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        };
        let update_row = OwnedTaskUpdate {
            owner_user_id: *task.owner_user_id.as_uuid(),
            status: task.status.as_str(),
            actor_user_id: *task.actor_user_id.as_uuid(),
            updated_at: task.updated_at,
        };

        diesel::insert_into(user_owned_tasks::table)
            .values(&new_row)
            .on_conflict((user_owned_tasks::tenant_id, user_owned_tasks::step_id))
            .do_update()
            .set(&update_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn valid_row() -> OwnedTaskRow {
        let now = Utc::now();
        OwnedTaskRow {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            owner_user_id: Uuid::new_v4(),
            step_id: Uuid::new_v4(),
            status: "assigned".to_owned(),
            actor_user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn row_conversion_parses_status(valid_row: OwnedTaskRow) {
        let task = row_to_task(valid_row).expect("valid row converts");
        assert_eq!(task.status.as_str(), "assigned");
    }

    #[rstest]
    fn row_conversion_rejects_unknown_status(mut valid_row: OwnedTaskRow) {
        valid_row.status = "lost".to_owned();

        let error = row_to_task(valid_row).expect_err("unknown status should fail");
        assert!(matches!(error, OwnedTaskRepositoryError::Query { .. }));
    }
}
