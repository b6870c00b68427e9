//! Driving ports for the user alerts surface.

use async_trait::async_trait;

use crate::domain::sidecar::AlertSummary;
use crate::domain::{Error, TenantId, UserId};

/// Request to list a user's alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListAlertsRequest {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub only_unread: bool,
    pub limit: i64,
}

/// Alerts listing with the unread tally the UI badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAlertsResponse {
    pub alerts: Vec<AlertSummary>,
    pub unread_count: i64,
}

/// Port for reading a user's alerts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertsQuery: Send + Sync {
    /// List alerts newest first, with the current unread count.
    async fn list_alerts(&self, request: ListAlertsRequest) -> Result<ListAlertsResponse, Error>;
}

/// Request to acknowledge all of a user's unread alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkAlertsReadRequest {
    pub tenant_id: TenantId,
    pub user_id: UserId,
}

/// Outcome of the bulk acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkAlertsReadResponse {
    /// Rows flipped by this call; zero when everything was already read.
    pub updated: u64,
}

/// Port for the mark-alerts-read bulk update. Idempotent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertsCommand: Send + Sync {
    /// Mark every unread alert for the user as read.
    async fn mark_alerts_read(
        &self,
        request: MarkAlertsReadRequest,
    ) -> Result<MarkAlertsReadResponse, Error>;
}

/// Fixture implementation with no alerts on file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertsQuery;

#[async_trait]
impl AlertsQuery for FixtureAlertsQuery {
    async fn list_alerts(&self, _request: ListAlertsRequest) -> Result<ListAlertsResponse, Error> {
        Ok(ListAlertsResponse {
            alerts: Vec::new(),
            unread_count: 0,
        })
    }
}

/// Fixture implementation acknowledging nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertsCommand;

#[async_trait]
impl AlertsCommand for FixtureAlertsCommand {
    async fn mark_alerts_read(
        &self,
        _request: MarkAlertsReadRequest,
    ) -> Result<MarkAlertsReadResponse, Error> {
        Ok(MarkAlertsReadResponse { updated: 0 })
    }
}
