//! User alerts handlers.
//!
//! ```text
//! GET  /api/v1/user/alerts?unreadOnly=true&limit=50
//! POST /api/v1/user/alerts/read
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ListAlertsRequest, MarkAlertsReadRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const DEFAULT_ALERTS_LIMIT: i64 = 50;

/// Query parameters for the alerts listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsQueryParams {
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
}

/// One alert in the listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub patient_id: Option<String>,
    pub priority: String,
    pub kind: String,
    pub message: String,
    pub read: bool,
    #[schema(format = "date-time")]
    pub created_at: String,
}

/// Alerts listing response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertsResponseBody {
    pub alerts: Vec<AlertBody>,
    pub unread_count: i64,
}

/// List the session user's alerts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/user/alerts",
    params(
        ("unreadOnly" = Option<bool>, Query, description = "Restrict to unread alerts"),
        ("limit" = Option<i64>, Query, description = "Page size, capped server-side")
    ),
    responses(
        (status = 200, description = "Alerts for the session user", body = AlertsResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["alerts"],
    operation_id = "listAlerts",
    security(("SessionCookie" = []))
)]
#[get("/user/alerts")]
pub async fn list_alerts(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AlertsQueryParams>,
) -> ApiResult<web::Json<AlertsResponseBody>> {
    let identity = session.require_identity()?;
    let params = query.into_inner();

    let response = state
        .alerts
        .list_alerts(ListAlertsRequest {
            tenant_id: identity.tenant_id,
            user_id: identity.user_id,
            only_unread: params.unread_only.unwrap_or(false),
            limit: params.limit.unwrap_or(DEFAULT_ALERTS_LIMIT),
        })
        .await?;

    Ok(web::Json(AlertsResponseBody {
        alerts: response
            .alerts
            .into_iter()
            .map(|alert| AlertBody {
                id: alert.id.to_string(),
                patient_id: alert.patient_id.map(|id| id.to_string()),
                priority: alert.priority.as_str().to_owned(),
                kind: alert.kind.as_str().to_owned(),
                message: alert.message,
                read: alert.read,
                created_at: alert.created_at.to_rfc3339(),
            })
            .collect(),
        unread_count: response.unread_count,
    }))
}

/// Mark-read response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAlertsReadResponseBody {
    pub updated: u64,
}

/// Mark every unread alert for the session user as read. Idempotent.
#[utoipa::path(
    post,
    path = "/api/v1/user/alerts/read",
    responses(
        (status = 200, description = "Alerts acknowledged", body = MarkAlertsReadResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["alerts"],
    operation_id = "markAlertsRead",
    security(("SessionCookie" = []))
)]
#[post("/user/alerts/read")]
pub async fn mark_alerts_read(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MarkAlertsReadResponseBody>> {
    let identity = session.require_identity()?;

    let response = state
        .alerts_command
        .mark_alerts_read(MarkAlertsReadRequest {
            tenant_id: identity.tenant_id,
            user_id: identity.user_id,
        })
        .await?;

    Ok(web::Json(MarkAlertsReadResponseBody {
        updated: response.updated,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use chrono::Utc;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{ListAlertsResponse, MockAlertsQuery};
    use crate::domain::sidecar::AlertSummary;
    use crate::domain::{AlertId, AlertKind, AlertPriority};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{
        fixture_http_state, fixture_ports, http_state_with, login_cookie,
        test_session_middleware,
    };
    use crate::inbound::http::users::login;

    fn test_app(
        state: web::Data<crate::inbound::http::state::HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(list_alerts)
                    .service(mark_alerts_read),
            )
    }

    #[actix_web::test]
    async fn listing_requires_a_session() {
        let app = actix_test::init_service(test_app(fixture_http_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/user/alerts")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn listing_returns_alerts_with_unread_count() {
        let mut alerts = MockAlertsQuery::new();
        alerts.expect_list_alerts().returning(|request| {
            Ok(ListAlertsResponse {
                alerts: vec![AlertSummary {
                    id: AlertId::random(),
                    patient_id: None,
                    priority: AlertPriority::High,
                    kind: AlertKind::ClaimDenied,
                    message: "claim 881 denied by payer".to_owned(),
                    read: false,
                    created_at: Utc::now(),
                }],
                unread_count: i64::from(request.only_unread),
            })
        });
        let ports = HttpStatePorts {
            alerts: Arc::new(alerts),
            ..fixture_ports()
        };
        let app = actix_test::init_service(test_app(http_state_with(ports))).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/user/alerts?unreadOnly=true")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value.get("unreadCount").and_then(Value::as_i64), Some(1));
        let first = &value.get("alerts").and_then(Value::as_array).expect("alerts")[0];
        assert_eq!(
            first.get("kind").and_then(Value::as_str),
            Some("claim_denied")
        );
        assert_eq!(first.get("priority").and_then(Value::as_str), Some("high"));
    }

    #[actix_web::test]
    async fn mark_read_is_idempotent_at_the_http_surface() {
        let app = actix_test::init_service(test_app(fixture_http_state())).await;
        let cookie = login_cookie(&app).await;

        for _ in 0..2 {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/user/alerts/read")
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = actix_test::read_body(response).await;
            let value: Value = serde_json::from_slice(&body).expect("response JSON");
            assert_eq!(value.get("updated").and_then(Value::as_u64), Some(0));
        }
    }
}
