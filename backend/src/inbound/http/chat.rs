//! Chat delegate handler.
//!
//! ```text
//! POST /api/v1/modes/chat/message {"message":"…","sessionId":"…"}
//! ```
//!
//! The handler owns no protocol state: it validates the payload shape and
//! returns whatever JSON the downstream agent produced, verbatim.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::SendChatMessageRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field};

/// Request payload for the chat message endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequestBody {
    pub message: Option<String>,
    /// Chat-session identifier; mandatory.
    pub session_id: Option<String>,
}

/// Forward a chat message to the conversation agent.
#[utoipa::path(
    post,
    path = "/api/v1/modes/chat/message",
    request_body = ChatMessageRequestBody,
    responses(
        (status = 200, description = "Agent reply, returned verbatim"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Agent unavailable", body = ErrorSchema)
    ),
    tags = ["chat"],
    operation_id = "chatMessage",
    security([])
)]
#[post("/modes/chat/message")]
pub async fn chat_message(
    state: web::Data<HttpState>,
    payload: web::Json<ChatMessageRequestBody>,
) -> ApiResult<web::Json<serde_json::Value>> {
    let body = payload.into_inner();
    let chat_session_id = require_field(body.session_id, FieldName::new("sessionId"))?;
    let message = require_field(body.message, FieldName::new("message"))?;

    let reply = state
        .chat
        .send_message(SendChatMessageRequest {
            message,
            chat_session_id,
        })
        .await?;

    Ok(web::Json(reply))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ChatService;
    use crate::domain::ports::MockConversationAgent;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{
        fixture_http_state, fixture_ports, http_state_with, test_session_middleware,
    };

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
            .service(web::scope("/api/v1").service(chat_message))
    }

    #[actix_web::test]
    async fn missing_session_id_is_rejected_before_the_agent() {
        let mut agent = MockConversationAgent::new();
        agent.expect_send_message().times(0);
        let ports = HttpStatePorts {
            chat: Arc::new(ChatService::new(Arc::new(agent))),
            ..fixture_ports()
        };
        let app = actix_test::init_service(test_app(http_state_with(ports))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/modes/chat/message")
                .set_json(json!({ "message": "hello" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert!(
            value
                .get("error")
                .and_then(Value::as_str)
                .expect("error field")
                .contains("sessionId")
        );
    }

    #[actix_web::test]
    async fn forwards_the_agent_reply_verbatim() {
        let mut agent = MockConversationAgent::new();
        agent
            .expect_send_message()
            .withf(|message, session| message == "status of claim 881?" && session == "chat-3")
            .times(1)
            .returning(|_, _| Ok(json!({ "reply": "denied, appeal drafted", "citations": [] })));
        let ports = HttpStatePorts {
            chat: Arc::new(ChatService::new(Arc::new(agent))),
            ..fixture_ports()
        };
        let app = actix_test::init_service(test_app(http_state_with(ports))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/modes/chat/message")
                .set_json(json!({
                    "message": "status of claim 881?",
                    "sessionId": "chat-3",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(
            value,
            json!({ "reply": "denied, appeal drafted", "citations": [] })
        );
    }

    #[actix_web::test]
    async fn fixture_agent_answers_without_a_session_cookie() {
        // The chat surface does not require login; the chat session id is
        // its own concept.
        let app = actix_test::init_service(test_app(fixture_http_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/modes/chat/message")
                .set_json(json!({
                    "message": "hello",
                    "sessionId": "chat-9",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(
            value.get("sessionId").and_then(Value::as_str),
            Some("chat-9")
        );
    }
}
