//! Chat delegate service.
//!
//! Owns no conversational state: validates the chat-session identifier, then
//! forwards the message to the agent port and returns its JSON verbatim. The
//! agent is never invoked for an invalid request.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    ChatDelegate, ConversationAgent, ConversationAgentError, SendChatMessageRequest,
};

fn map_agent_error(error: ConversationAgentError) -> Error {
    match error {
        ConversationAgentError::Unavailable { message } => {
            Error::service_unavailable(format!("conversation agent unavailable: {message}"))
        }
        ConversationAgentError::Protocol { message } => {
            Error::internal(format!("conversation agent protocol error: {message}"))
        }
    }
}

/// Chat service implementing the [`ChatDelegate`] driving port.
pub struct ChatService {
    agent: Arc<dyn ConversationAgent>,
}

impl ChatService {
    /// Create the service over the conversation agent port.
    pub fn new(agent: Arc<dyn ConversationAgent>) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl ChatDelegate for ChatService {
    async fn send_message(
        &self,
        request: SendChatMessageRequest,
    ) -> Result<serde_json::Value, Error> {
        if request.chat_session_id.trim().is_empty() {
            return Err(Error::invalid_request("session_id is required"));
        }
        if request.message.trim().is_empty() {
            return Err(Error::invalid_request("message must not be empty"));
        }

        self.agent
            .send_message(&request.message, &request.chat_session_id)
            .await
            .map_err(map_agent_error)
    }
}
