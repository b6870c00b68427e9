//! Sidecar state: the composite read model returned to the UI.
//!
//! One payload combining care readiness, the open bottlenecks of the active
//! plan, milestone progress, the unread alert count, and the user's owned
//! tasks. Built by the aggregation service from repository reads; plain data
//! the inbound adapter serialises.

use chrono::{DateTime, Utc};

use super::alert::AlertPriority;
use super::milestone::{MilestoneId, MilestoneKind, MilestoneStatus};
use super::ownership::{OwnedTaskId, OwnedTaskStatus};
use super::patient::{AttentionStatus, DisplayColor, PatientId};
use super::plan::{InputType, PlanId, StepId, StepStatus, StepType};
use super::readiness::ReadinessStatus;
use super::user::UserId;

/// Care-readiness summary for the patient banner.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessSummary {
    pub probability: f64,
    pub status: ReadinessStatus,
    pub color: DisplayColor,
    pub attention_status: AttentionStatus,
    pub resolved_until: Option<DateTime<Utc>>,
}

/// An open plan step blocking care readiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottleneckItem {
    pub step_id: StepId,
    pub plan_id: PlanId,
    pub title: String,
    pub step_type: StepType,
    pub input_type: InputType,
    pub status: StepStatus,
    pub priority: i32,
    pub position: i32,
}

/// A milestone with its latest audit point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneSummary {
    pub id: MilestoneId,
    pub kind: MilestoneKind,
    pub status: MilestoneStatus,
    pub occurred_at: Option<DateTime<Utc>>,
    pub latest_note: Option<String>,
    pub latest_recorded_at: Option<DateTime<Utc>>,
}

/// An owned task as the sidecar lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedTaskSummary {
    pub id: OwnedTaskId,
    pub step_id: StepId,
    pub status: OwnedTaskStatus,
    pub actor_user_id: UserId,
    pub updated_at: DateTime<Utc>,
}

/// An alert as the alerts endpoint lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSummary {
    pub id: super::alert::AlertId,
    pub patient_id: Option<PatientId>,
    pub priority: AlertPriority,
    pub kind: super::alert::AlertKind,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// The aggregated sidecar view model.
#[derive(Debug, Clone, PartialEq)]
pub struct SidecarState {
    pub patient_id: PatientId,
    pub patient_display_name: String,
    pub readiness: ReadinessSummary,
    pub bottlenecks: Vec<BottleneckItem>,
    pub milestones: Vec<MilestoneSummary>,
    pub unread_alerts: i64,
    pub owned_tasks: Vec<OwnedTaskSummary>,
}
