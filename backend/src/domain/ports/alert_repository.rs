//! Port for user alert reads and the mark-read bulk update.

use async_trait::async_trait;

use crate::domain::{TenantId, UserAlert, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by alert repository adapters.
    pub enum AlertRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "alert repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "alert repository query failed: {message}",
    }
}

/// Port for listing, counting, and acknowledging a user's alerts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// List a user's alerts, newest first, capped at `limit`.
    async fn list_for_user(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
        only_unread: bool,
        limit: i64,
    ) -> Result<Vec<UserAlert>, AlertRepositoryError>;

    /// Count the user's unread alerts.
    async fn unread_count(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
    ) -> Result<i64, AlertRepositoryError>;

    /// Flip every unread alert for the user to read. Idempotent; returns the
    /// number of rows updated by this call.
    async fn mark_all_read(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
    ) -> Result<u64, AlertRepositoryError>;
}

/// Fixture implementation with no alerts on file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertRepository;

#[async_trait]
impl AlertRepository for FixtureAlertRepository {
    async fn list_for_user(
        &self,
        _tenant_id: &TenantId,
        _user_id: &UserId,
        _only_unread: bool,
        _limit: i64,
    ) -> Result<Vec<UserAlert>, AlertRepositoryError> {
        Ok(Vec::new())
    }

    async fn unread_count(
        &self,
        _tenant_id: &TenantId,
        _user_id: &UserId,
    ) -> Result<i64, AlertRepositoryError> {
        Ok(0)
    }

    async fn mark_all_read(
        &self,
        _tenant_id: &TenantId,
        _user_id: &UserId,
    ) -> Result<u64, AlertRepositoryError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_mark_all_read_touches_nothing() {
        let repo = FixtureAlertRepository;
        let updated = repo
            .mark_all_read(&TenantId::random(), &UserId::random())
            .await
            .expect("fixture update succeeds");
        assert_eq!(updated, 0);
    }
}
