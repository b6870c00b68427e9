//! Resolution plans, plan steps, and step answers.
//!
//! A resolution plan is the ordered checklist raised to clear a patient's
//! billing/eligibility gap. Open steps are the "bottlenecks" surfaced by the
//! sidecar. Step statuses only ever move forward; a regressing transition is
//! a validation error before any write is attempted.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::TenantId;
use super::patient::{PatientId, UnknownVariant};
use super::user::UserId;

/// Opaque resolution-plan identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanId(Uuid);

impl PlanId {
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque plan-step identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(Uuid);

impl StepId {
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a resolution plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    /// At least one step remains unresolved.
    Open,
    /// Every step is resolved.
    Closed,
}

impl PlanStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for PlanStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(UnknownVariant::new("plan status", other)),
        }
    }
}

/// Step status progression. Strictly monotonic: `pending → in_progress →
/// resolved`. The database check constraint guards the value set; the
/// monotonic direction is validated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    InProgress,
    Resolved,
}

impl StepStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Resolved => 2,
        }
    }

    /// Whether moving from `self` to `next` respects the progression.
    pub const fn can_progress_to(self, next: Self) -> bool {
        next.rank() > self.rank()
    }

    /// Whether the step still blocks care readiness.
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Resolved)
    }
}

impl FromStr for StepStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(UnknownVariant::new("step status", other)),
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of work a step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepType {
    /// Collect or upload a document.
    Document,
    /// Verify coverage or eligibility with a payer.
    Verification,
    /// Contact the patient or an external party.
    Outreach,
    /// Internal review or sign-off.
    Review,
}

impl StepType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Verification => "verification",
            Self::Outreach => "outreach",
            Self::Review => "review",
        }
    }
}

impl FromStr for StepType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(Self::Document),
            "verification" => Ok(Self::Verification),
            "outreach" => Ok(Self::Outreach),
            "review" => Ok(Self::Review),
            other => Err(UnknownVariant::new("step type", other)),
        }
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The input widget a step expects from the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Choice,
    File,
    Confirmation,
}

impl InputType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Choice => "choice",
            Self::File => "file",
            Self::Confirmation => "confirmation",
        }
    }
}

impl FromStr for InputType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "choice" => Ok(Self::Choice),
            "file" => Ok(Self::File),
            "confirmation" => Ok(Self::Confirmation),
            other => Err(UnknownVariant::new("input type", other)),
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolution plan header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPlan {
    pub id: PlanId,
    pub tenant_id: TenantId,
    pub patient_id: PatientId,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
}

/// A single step on a resolution plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub id: StepId,
    pub plan_id: PlanId,
    pub tenant_id: TenantId,
    pub title: String,
    pub step_type: StepType,
    pub input_type: InputType,
    pub status: StepStatus,
    /// Higher priority sorts first among open steps.
    pub priority: i32,
    /// Stable ordering within the plan.
    pub position: i32,
}

/// How an answer payload should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    /// A structured answer that resolves the step.
    Value,
    /// A free-text note that leaves the step open.
    Note,
}

impl AnswerMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Note => "note",
        }
    }

    /// Whether recording this answer resolves the step.
    pub const fn resolves_step(self) -> bool {
        matches!(self, Self::Value)
    }
}

impl FromStr for AnswerMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(Self::Value),
            "note" => Ok(Self::Note),
            other => Err(UnknownVariant::new("answer mode", other)),
        }
    }
}

impl std::fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded response to a plan step. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct StepAnswer {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub step_id: StepId,
    pub answer_mode: AnswerMode,
    pub payload: serde_json::Value,
    pub recorded_by: UserId,
    pub recorded_at: DateTime<Utc>,
}
