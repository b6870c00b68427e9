//! HTTP-backed `ConversationAgent` adapter.
//!
//! POSTs `{"message": …, "sessionId": …}` to the configured agent service
//! and returns its JSON body verbatim. Transport failures map to the port's
//! `Unavailable` error, non-success statuses and non-JSON bodies to
//! `Protocol`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::domain::ports::{ConversationAgent, ConversationAgentError};

const AGENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AgentRequest<'a> {
    message: &'a str,
    session_id: &'a str,
}

/// Reqwest-backed implementation of the conversation agent port.
#[derive(Clone)]
pub struct HttpConversationAgent {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpConversationAgent {
    /// Create an adapter targeting the given agent message endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationAgentError::Unavailable`] when the HTTP client
    /// cannot be constructed.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConversationAgentError> {
        let client = reqwest::Client::builder()
            .timeout(AGENT_REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ConversationAgentError::unavailable(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ConversationAgent for HttpConversationAgent {
    async fn send_message(
        &self,
        message: &str,
        chat_session_id: &str,
    ) -> Result<serde_json::Value, ConversationAgentError> {
        debug!(session = %chat_session_id, "forwarding chat message to agent service");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AgentRequest {
                message,
                session_id: chat_session_id,
            })
            .send()
            .await
            .map_err(|err| ConversationAgentError::unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConversationAgentError::protocol(format!(
                "agent answered with status {status}"
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|err| ConversationAgentError::protocol(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_camel_case() {
        let body = serde_json::to_value(AgentRequest {
            message: "hello",
            session_id: "chat-1",
        })
        .expect("request serialises");
        assert_eq!(
            body,
            serde_json::json!({ "message": "hello", "sessionId": "chat-1" })
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_unavailable() {
        // Port 9 (discard) is not listening locally; connection is refused.
        let agent = HttpConversationAgent::new("http://127.0.0.1:9/agent")
            .expect("client builds");
        let err = agent
            .send_message("hello", "chat-1")
            .await
            .expect_err("unreachable endpoint fails");
        assert!(matches!(err, ConversationAgentError::Unavailable { .. }));
    }
}
