//! Driving port for the chat delegate.

use async_trait::async_trait;

use crate::domain::Error;

/// Request to forward one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendChatMessageRequest {
    pub message: String,
    pub chat_session_id: String,
}

/// Port for forwarding a chat message and returning the agent's reply
/// verbatim.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatDelegate: Send + Sync {
    /// Forward a message within a chat session.
    async fn send_message(&self, request: SendChatMessageRequest)
    -> Result<serde_json::Value, Error>;
}
