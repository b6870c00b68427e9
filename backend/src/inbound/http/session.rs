//! Session helpers keeping HTTP handlers free of framework-specific logic.
//!
//! Thin wrapper around Actix sessions so handlers deal only with the
//! domain-facing identity: the authenticated user and the tenant the session
//! is bound to.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthenticatedUser, Error, TenantId, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const TENANT_ID_KEY: &str = "tenant_id";

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &AuthenticatedUser) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, identity.user_id.to_string())
            .and_then(|()| self.0.insert(TENANT_ID_KEY, identity.tenant_id.to_string()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current identity from the session, if present and intact.
    pub fn identity(&self) -> Result<Option<AuthenticatedUser>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(user_raw), Some(tenant_raw)) = (read(USER_ID_KEY)?, read(TENANT_ID_KEY)?) else {
            return Ok(None);
        };
        match (UserId::new(&user_raw), TenantId::new(&tenant_raw)) {
            (Ok(user_id), Ok(tenant_id)) => Ok(Some(AuthenticatedUser { user_id, tenant_id })),
            _ => {
                tracing::warn!("malformed identity in session cookie");
                Ok(None)
            }
        }
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<AuthenticatedUser, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
