//! Outbound adapter for the external conversation agent service.

mod http_agent;

pub use http_agent::HttpConversationAgent;
