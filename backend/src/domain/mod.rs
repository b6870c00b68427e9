//! Domain primitives, aggregates, services, and ports.
//!
//! Everything here is transport agnostic: inbound adapters translate HTTP
//! into these types, and outbound adapters implement the ports. Types are
//! immutable once constructed and document their invariants in Rustdoc.

pub mod alert;
mod alert_service;
mod assignment_service;
mod chat_service;
pub mod error;
pub mod milestone;
pub mod ownership;
pub mod patient;
mod patient_service;
pub mod plan;
mod plan_service;
pub mod ports;
pub mod readiness;
pub mod sidecar;
mod sidecar_service;
pub mod tenant;
pub mod user;

pub use self::alert::{AlertId, AlertKind, AlertPriority, UserAlert};
pub use self::alert_service::UserAlertsService;
pub use self::assignment_service::AssignmentService;
pub use self::chat_service::ChatService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::milestone::{
    Milestone, MilestoneHistoryEntry, MilestoneId, MilestoneKind, MilestoneStatus,
    MilestoneWithLatest,
};
pub use self::ownership::{OwnedTask, OwnedTaskId, OwnedTaskStatus};
pub use self::patient::{
    AttentionStatus, DisplayColor, PatientContext, PatientId, PatientIdValidationError,
    UnknownVariant,
};
pub use self::patient_service::PatientCommandService;
pub use self::plan::{
    AnswerMode, InputType, PlanId, PlanStatus, PlanStep, ResolutionPlan, StepAnswer, StepId,
    StepStatus, StepType,
};
pub use self::plan_service::PlanCommandService;
pub use self::readiness::{ReadinessStatus, display_color, readiness_status};
pub use self::sidecar::{
    AlertSummary, BottleneckItem, MilestoneSummary, OwnedTaskSummary, ReadinessSummary,
    SidecarState,
};
pub use self::sidecar_service::SidecarService;
pub use self::tenant::{TenantId, TenantIdValidationError};
pub use self::user::{
    AuthenticatedUser, LoginCredentials, LoginValidationError, UserId, UserIdValidationError,
};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
