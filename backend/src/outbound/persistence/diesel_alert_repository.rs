//! PostgreSQL-backed `AlertRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AlertRepository, AlertRepositoryError};
use crate::domain::{AlertId, PatientId, TenantId, UserAlert, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserAlertRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_alerts;

/// Diesel-backed implementation of the alert repository port.
#[derive(Clone)]
pub struct DieselAlertRepository {
    pool: DbPool,
}

impl DieselAlertRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AlertRepositoryError {
    map_basic_pool_error(error, AlertRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AlertRepositoryError {
    map_basic_diesel_error(
        error,
        AlertRepositoryError::query,
        AlertRepositoryError::connection,
    )
}

fn row_to_alert(row: UserAlertRow) -> Result<UserAlert, AlertRepositoryError> {
    let map_variant =
        |err: crate::domain::UnknownVariant| AlertRepositoryError::query(err.to_string());

    Ok(UserAlert {
        id: AlertId::from_uuid(row.id),
        tenant_id: TenantId::from_uuid(row.tenant_id),
        user_id: UserId::from_uuid(row.user_id),
        patient_id: row.patient_id.map(PatientId::from_uuid),
        priority: row.priority.parse().map_err(map_variant)?,
        kind: row.kind.parse().map_err(map_variant)?,
        message: row.message,
        read: row.read,
        created_at: row.created_at,
    })
}

#[async_trait]
impl AlertRepository for DieselAlertRepository {
    async fn list_for_user(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
        only_unread: bool,
        limit: i64,
    ) -> Result<Vec<UserAlert>, AlertRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = user_alerts::table
            .filter(
                user_alerts::user_id
                    .eq(user_id.as_uuid())
                    .and(user_alerts::tenant_id.eq(tenant_id.as_uuid())),
            )
            .select(UserAlertRow::as_select())
            .into_boxed();
        if only_unread {
            query = query.filter(user_alerts::read.eq(false));
        }

        let rows: Vec<UserAlertRow> = query
            .order((user_alerts::created_at.desc(), user_alerts::id.desc()))
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_alert).collect()
    }

    async fn unread_count(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
    ) -> Result<i64, AlertRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        user_alerts::table
            .filter(
                user_alerts::user_id
                    .eq(user_id.as_uuid())
                    .and(user_alerts::tenant_id.eq(tenant_id.as_uuid()))
                    .and(user_alerts::read.eq(false)),
            )
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn mark_all_read(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
    ) -> Result<u64, AlertRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Only unread rows match, so repeating the call is a no-op.
        let updated = diesel::update(
            user_alerts::table.filter(
                user_alerts::user_id
                    .eq(user_id.as_uuid())
                    .and(user_alerts::tenant_id.eq(tenant_id.as_uuid()))
                    .and(user_alerts::read.eq(false)),
            ),
        )
        .set(user_alerts::read.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn valid_row() -> UserAlertRow {
        UserAlertRow {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            patient_id: Some(Uuid::new_v4()),
            priority: "high".to_owned(),
            kind: "claim_denied".to_owned(),
            message: "claim 881 denied by payer".to_owned(),
            read: false,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_conversion_parses_enumerated_columns(valid_row: UserAlertRow) {
        let alert = row_to_alert(valid_row).expect("valid row converts");
        assert_eq!(alert.priority.as_str(), "high");
        assert_eq!(alert.kind.as_str(), "claim_denied");
        assert!(!alert.read);
    }

    #[rstest]
    fn row_conversion_rejects_unknown_priority(mut valid_row: UserAlertRow) {
        valid_row.priority = "screaming".to_owned();

        let error = row_to_alert(valid_row).expect_err("unknown priority should fail");
        assert!(matches!(error, AlertRepositoryError::Query { .. }));
    }
}
