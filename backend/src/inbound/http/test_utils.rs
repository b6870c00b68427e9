//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;

use crate::domain::ChatService;
use crate::domain::ports::{
    FixtureAlertsCommand, FixtureAlertsQuery, FixtureAssignmentCommand, FixtureConversationAgent,
    FixtureLoginService, FixturePatientCommand, FixturePlanCommand, FixtureSidecarQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// Generates a fresh signing key per invocation and disables the `Secure`
/// flag for plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Fixture-backed ports bundle; tests replace individual fields with mocks.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        sidecar: Arc::new(FixtureSidecarQuery),
        patient_commands: Arc::new(FixturePatientCommand),
        plan_commands: Arc::new(FixturePlanCommand),
        assignments: Arc::new(FixtureAssignmentCommand),
        alerts: Arc::new(FixtureAlertsQuery),
        alerts_command: Arc::new(FixtureAlertsCommand),
        chat: Arc::new(ChatService::new(Arc::new(FixtureConversationAgent))),
    }
}

/// Fixture-backed HTTP state for handler tests.
pub fn fixture_http_state() -> web::Data<HttpState> {
    http_state_with(fixture_ports())
}

/// Wrap a ports bundle for injection into a test app.
pub fn http_state_with(ports: HttpStatePorts) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(ports))
}

/// Log in with the fixture credentials and return the session cookie.
pub async fn login_cookie<S, B>(app: &S) -> actix_web::cookie::Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let response = actix_web::test::call_service(
        app,
        actix_web::test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({
                "username": "admin",
                "password": "password",
            }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "fixture login succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
