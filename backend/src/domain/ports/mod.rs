//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod alert_repository;
mod alerts_query;
mod assignment_command;
mod chat_delegate;
mod conversation_agent;
mod login_service;
mod milestone_repository;
mod owned_task_repository;
mod patient_command;
mod patient_repository;
mod plan_command;
mod plan_repository;
mod sidecar_query;

#[cfg(test)]
pub use alert_repository::MockAlertRepository;
pub use alert_repository::{AlertRepository, AlertRepositoryError, FixtureAlertRepository};
#[cfg(test)]
pub use alerts_query::{MockAlertsCommand, MockAlertsQuery};
pub use alerts_query::{
    AlertsCommand, AlertsQuery, FixtureAlertsCommand, FixtureAlertsQuery, ListAlertsRequest,
    ListAlertsResponse, MarkAlertsReadRequest, MarkAlertsReadResponse,
};
#[cfg(test)]
pub use assignment_command::MockAssignmentCommand;
pub use assignment_command::{
    AssignBulkRequest, AssignBulkResponse, AssignRequest, AssignResponse, AssignmentCommand,
    FixtureAssignmentCommand, OwnRequest,
};
#[cfg(test)]
pub use chat_delegate::MockChatDelegate;
pub use chat_delegate::{ChatDelegate, SendChatMessageRequest};
#[cfg(test)]
pub use conversation_agent::MockConversationAgent;
pub use conversation_agent::{
    ConversationAgent, ConversationAgentError, FixtureConversationAgent,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use milestone_repository::MockMilestoneRepository;
pub use milestone_repository::{
    FixtureMilestoneRepository, MilestoneRepository, MilestoneRepositoryError,
};
#[cfg(test)]
pub use owned_task_repository::MockOwnedTaskRepository;
pub use owned_task_repository::{
    FixtureOwnedTaskRepository, OwnedTaskRepository, OwnedTaskRepositoryError,
};
#[cfg(test)]
pub use patient_command::MockPatientCommand;
pub use patient_command::{
    ApplyOverridesRequest, ApplyOverridesResponse, FixturePatientCommand, PatientCommand,
};
#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::{
    FixturePatientRepository, PatientOverrideChanges, PatientRepository, PatientRepositoryError,
};
#[cfg(test)]
pub use plan_command::MockPlanCommand;
pub use plan_command::{
    FixturePlanCommand, PlanCommand, RecordAnswerRequest, RecordAnswerResponse, RecordNoteRequest,
    RecordNoteResponse,
};
#[cfg(test)]
pub use plan_repository::MockPlanRepository;
pub use plan_repository::{FixturePlanRepository, PlanRepository, PlanRepositoryError};
#[cfg(test)]
pub use sidecar_query::MockSidecarQuery;
pub use sidecar_query::{FixtureSidecarQuery, SidecarQuery, SidecarStateRequest};
