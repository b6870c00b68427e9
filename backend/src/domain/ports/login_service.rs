//! Port for session authentication.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials, TenantId, UserId};

/// Port resolving credentials to an authenticated user and tenant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate the credentials or fail with `unauthorized`.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, Error>;
}

pub(crate) const FIXTURE_LOGIN_USERNAME: &str = "admin";
pub(crate) const FIXTURE_LOGIN_PASSWORD: &str = "password";
pub(crate) const FIXTURE_LOGIN_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
pub(crate) const FIXTURE_LOGIN_TENANT_ID: &str = "9e107d9d-372b-4b1a-9c59-1a2fbd6b0f2e";

/// Fixture login accepting the development credentials.
///
/// Credential persistence is out of scope here; deployments front the API
/// with their identity provider and this port adapts it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        if credentials.username() == FIXTURE_LOGIN_USERNAME
            && credentials.password() == FIXTURE_LOGIN_PASSWORD
        {
            let user_id = UserId::new(FIXTURE_LOGIN_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
            let tenant_id = TenantId::new(FIXTURE_LOGIN_TENANT_ID)
                .map_err(|err| Error::internal(format!("invalid fixture tenant id: {err}")))?;
            Ok(AuthenticatedUser { user_id, tenant_id })
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_accepts_dev_credentials() {
        let service = FixtureLoginService;
        let credentials = LoginCredentials::try_from_parts("admin", "password")
            .expect("fixture credentials shape");
        let authenticated = service
            .authenticate(&credentials)
            .await
            .expect("fixture login succeeds");
        assert_eq!(authenticated.user_id.to_string(), FIXTURE_LOGIN_USER_ID);
    }

    #[tokio::test]
    async fn fixture_rejects_wrong_password() {
        let service = FixtureLoginService;
        let credentials =
            LoginCredentials::try_from_parts("admin", "wrong").expect("credentials shape");
        assert!(service.authenticate(&credentials).await.is_err());
    }
}
