//! Alerts service: listing and the idempotent mark-read update.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AlertRepository, AlertRepositoryError, AlertsCommand, AlertsQuery, ListAlertsRequest,
    ListAlertsResponse, MarkAlertsReadRequest, MarkAlertsReadResponse,
};
use crate::domain::sidecar::AlertSummary;
use crate::domain::Error;

/// Hard cap on alert page size regardless of the requested limit.
const MAX_ALERTS_PAGE: i64 = 200;

fn map_repository_error(error: AlertRepositoryError) -> Error {
    match error {
        AlertRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("alert repository unavailable: {message}"))
        }
        AlertRepositoryError::Query { message } => {
            Error::internal(format!("alert repository error: {message}"))
        }
    }
}

/// Alerts service implementing both alert driving ports.
pub struct UserAlertsService {
    alerts: Arc<dyn AlertRepository>,
}

impl UserAlertsService {
    /// Create the service over the alert repository.
    pub fn new(alerts: Arc<dyn AlertRepository>) -> Self {
        Self { alerts }
    }
}

#[async_trait]
impl AlertsQuery for UserAlertsService {
    async fn list_alerts(&self, request: ListAlertsRequest) -> Result<ListAlertsResponse, Error> {
        if request.limit <= 0 {
            return Err(Error::invalid_request("limit must be positive"));
        }
        let limit = request.limit.min(MAX_ALERTS_PAGE);

        let alerts = self
            .alerts
            .list_for_user(
                &request.tenant_id,
                &request.user_id,
                request.only_unread,
                limit,
            )
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(|alert| AlertSummary {
                id: alert.id,
                patient_id: alert.patient_id,
                priority: alert.priority,
                kind: alert.kind,
                message: alert.message,
                read: alert.read,
                created_at: alert.created_at,
            })
            .collect();

        let unread_count = self
            .alerts
            .unread_count(&request.tenant_id, &request.user_id)
            .await
            .map_err(map_repository_error)?;

        Ok(ListAlertsResponse {
            alerts,
            unread_count,
        })
    }
}

#[async_trait]
impl AlertsCommand for UserAlertsService {
    async fn mark_alerts_read(
        &self,
        request: MarkAlertsReadRequest,
    ) -> Result<MarkAlertsReadResponse, Error> {
        let updated = self
            .alerts
            .mark_all_read(&request.tenant_id, &request.user_id)
            .await
            .map_err(map_repository_error)?;
        Ok(MarkAlertsReadResponse { updated })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::ports::MockAlertRepository;
    use crate::domain::{
        AlertId, AlertKind, AlertPriority, ErrorCode, TenantId, UserAlert, UserId,
    };

    fn alert(tenant_id: TenantId, user_id: UserId, read: bool) -> UserAlert {
        UserAlert {
            id: AlertId::random(),
            tenant_id,
            user_id,
            patient_id: None,
            priority: AlertPriority::High,
            kind: AlertKind::ClaimDenied,
            message: "claim 881 denied by payer".to_owned(),
            read,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn listing_caps_the_requested_limit() {
        let tenant_id = TenantId::random();
        let user_id = UserId::random();
        let mut repo = MockAlertRepository::new();
        let listed = alert(tenant_id, user_id, false);
        repo.expect_list_for_user()
            .withf(|_, _, _, limit| *limit == MAX_ALERTS_PAGE)
            .returning(move |_, _, _, _| Ok(vec![listed.clone()]));
        repo.expect_unread_count().returning(|_, _| Ok(1));

        let response = UserAlertsService::new(Arc::new(repo))
            .list_alerts(ListAlertsRequest {
                tenant_id,
                user_id,
                only_unread: false,
                limit: 10_000,
            })
            .await
            .expect("listing succeeds");
        assert_eq!(response.alerts.len(), 1);
        assert_eq!(response.unread_count, 1);
    }

    #[tokio::test]
    async fn non_positive_limit_is_invalid() {
        let repo = MockAlertRepository::new();

        let err = UserAlertsService::new(Arc::new(repo))
            .list_alerts(ListAlertsRequest {
                tenant_id: TenantId::random(),
                user_id: UserId::random(),
                only_unread: false,
                limit: 0,
            })
            .await
            .expect_err("zero limit rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn mark_read_reports_rows_updated() {
        let mut repo = MockAlertRepository::new();
        repo.expect_mark_all_read().returning(|_, _| Ok(3));

        let response = UserAlertsService::new(Arc::new(repo))
            .mark_alerts_read(MarkAlertsReadRequest {
                tenant_id: TenantId::random(),
                user_id: UserId::random(),
            })
            .await
            .expect("mark read succeeds");
        assert_eq!(response.updated, 3);
    }

    #[tokio::test]
    async fn mark_read_twice_converges_to_zero_updates() {
        // Repository reports three rows flipped on the first call and none
        // on the second: the end state is identical either way.
        let mut repo = MockAlertRepository::new();
        let mut remaining = 3_u64;
        repo.expect_mark_all_read().times(2).returning(move |_, _| {
            let flipped = remaining;
            remaining = 0;
            Ok(flipped)
        });

        let service = UserAlertsService::new(Arc::new(repo));
        let request = MarkAlertsReadRequest {
            tenant_id: TenantId::random(),
            user_id: UserId::random(),
        };
        let first = service
            .mark_alerts_read(request)
            .await
            .expect("first call succeeds");
        let second = service
            .mark_alerts_read(request)
            .await
            .expect("second call succeeds");
        assert_eq!(first.updated, 3);
        assert_eq!(second.updated, 0);
    }
}
