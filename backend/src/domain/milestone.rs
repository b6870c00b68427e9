//! Care-journey milestones and their append-only history.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::TenantId;
use super::patient::{PatientId, UnknownVariant};

/// Opaque milestone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MilestoneId(Uuid);

impl MilestoneId {
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

impl std::fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The care-journey stage a milestone marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneKind {
    Intake,
    Eligibility,
    Authorization,
    Scheduling,
    Billing,
}

impl MilestoneKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Eligibility => "eligibility",
            Self::Authorization => "authorization",
            Self::Scheduling => "scheduling",
            Self::Billing => "billing",
        }
    }
}

impl FromStr for MilestoneKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intake" => Ok(Self::Intake),
            "eligibility" => Ok(Self::Eligibility),
            "authorization" => Ok(Self::Authorization),
            "scheduling" => Ok(Self::Scheduling),
            "billing" => Ok(Self::Billing),
            other => Err(UnknownVariant::new("milestone kind", other)),
        }
    }
}

impl std::fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a milestone currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneStatus {
    Pending,
    Reached,
    Skipped,
}

impl MilestoneStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reached => "reached",
            Self::Skipped => "skipped",
        }
    }
}

impl FromStr for MilestoneStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "reached" => Ok(Self::Reached),
            "skipped" => Ok(Self::Skipped),
            other => Err(UnknownVariant::new("milestone status", other)),
        }
    }
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A care-journey progress marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub id: MilestoneId,
    pub tenant_id: TenantId,
    pub patient_id: PatientId,
    pub kind: MilestoneKind,
    pub status: MilestoneStatus,
    pub occurred_at: Option<DateTime<Utc>>,
}

/// One append-only audit entry for a milestone. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneHistoryEntry {
    pub id: Uuid,
    pub milestone_id: MilestoneId,
    pub status: MilestoneStatus,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// A milestone joined with its most recent history entry, as the sidecar
/// presents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneWithLatest {
    pub milestone: Milestone,
    pub latest: Option<MilestoneHistoryEntry>,
}
