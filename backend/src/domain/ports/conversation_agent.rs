//! Port for the external conversation agent.
//!
//! The chat endpoint owns no conversational state; it forwards a message and
//! chat-session identifier to whatever implements this port and returns the
//! agent's JSON verbatim.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by conversation agent adapters.
    pub enum ConversationAgentError {
        /// The agent service could not be reached.
        Unavailable { message: String } =>
            "conversation agent unavailable: {message}",
        /// The agent answered with something other than JSON.
        Protocol { message: String } =>
            "conversation agent protocol error: {message}",
    }
}

/// Port for forwarding a chat message to the downstream agent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationAgent: Send + Sync {
    /// Forward a message within a chat session and return the agent's reply
    /// verbatim.
    async fn send_message(
        &self,
        message: &str,
        chat_session_id: &str,
    ) -> Result<serde_json::Value, ConversationAgentError>;
}

/// Fixture agent answering a canned acknowledgment. Used in tests and when
/// no agent service URL is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureConversationAgent;

#[async_trait]
impl ConversationAgent for FixtureConversationAgent {
    async fn send_message(
        &self,
        message: &str,
        chat_session_id: &str,
    ) -> Result<serde_json::Value, ConversationAgentError> {
        Ok(serde_json::json!({
            "reply": format!("received: {message}"),
            "sessionId": chat_session_id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_echoes_the_session() {
        let agent = FixtureConversationAgent;
        let reply = agent
            .send_message("hello", "chat-1")
            .await
            .expect("fixture reply succeeds");
        assert_eq!(
            reply.get("sessionId").and_then(|v| v.as_str()),
            Some("chat-1")
        );
    }
}
