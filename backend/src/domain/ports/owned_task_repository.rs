//! Port for ownership-claim persistence.

use async_trait::async_trait;

use crate::domain::{OwnedTask, TenantId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by owned-task repository adapters.
    pub enum OwnedTaskRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "owned task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "owned task repository query failed: {message}",
    }
}

/// Port for listing and upserting ownership claims.
///
/// One claim exists per step; `upsert` replaces the owner, status, and actor
/// when a claim for the step is already on file.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnedTaskRepository: Send + Sync {
    /// List the tasks a user currently owns, most recently updated first.
    async fn list_for_user(
        &self,
        tenant_id: &TenantId,
        user_id: &UserId,
    ) -> Result<Vec<OwnedTask>, OwnedTaskRepositoryError>;

    /// Create or replace the claim for the task's step.
    async fn upsert(&self, task: &OwnedTask) -> Result<(), OwnedTaskRepositoryError>;
}

/// Fixture implementation with no claims on file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOwnedTaskRepository;

#[async_trait]
impl OwnedTaskRepository for FixtureOwnedTaskRepository {
    async fn list_for_user(
        &self,
        _tenant_id: &TenantId,
        _user_id: &UserId,
    ) -> Result<Vec<OwnedTask>, OwnedTaskRepositoryError> {
        Ok(Vec::new())
    }

    async fn upsert(&self, _task: &OwnedTask) -> Result<(), OwnedTaskRepositoryError> {
        Ok(())
    }
}
