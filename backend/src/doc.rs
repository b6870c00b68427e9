//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST API:
//! endpoint paths from the inbound layer, the error envelope schema, and the
//! session cookie security scheme. Swagger UI serves the document in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::ErrorSchema;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Careside backend API",
        description = "HTTP interface for sidecar state aggregation, resolution plan mutations, user alerts, ownership assignment, and the chat delegate."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::sidecar::sidecar_state,
        crate::inbound::http::sidecar::answer_step,
        crate::inbound::http::sidecar::note_step,
        crate::inbound::http::sidecar::assign_step,
        crate::inbound::http::sidecar::assign_bulk,
        crate::inbound::http::sidecar::own_step,
        crate::inbound::http::sidecar::override_patient,
        crate::inbound::http::alerts::list_alerts,
        crate::inbound::http::alerts::mark_alerts_read,
        crate::inbound::http::chat::chat_message,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/v1/login",
            "/api/v1/sidecar/state",
            "/api/v1/sidecar/answer",
            "/api/v1/sidecar/note",
            "/api/v1/sidecar/assign",
            "/api/v1/sidecar/assign-bulk",
            "/api/v1/sidecar/own",
            "/api/v1/sidecar/override",
            "/api/v1/user/alerts",
            "/api/v1/user/alerts/read",
            "/api/v1/modes/chat/message",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
