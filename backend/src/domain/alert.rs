//! Cross-patient user alerts.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::TenantId;
use super::patient::{PatientId, UnknownVariant};
use super::user::UserId;

/// Opaque alert identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertId(Uuid);

impl AlertId {
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

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How urgently an alert needs the user's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertPriority {
    Low,
    Medium,
    High,
}

impl AlertPriority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for AlertPriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(UnknownVariant::new("alert priority", other)),
        }
    }
}

impl std::fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What business trigger produced the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    EligibilityGap,
    ClaimDenied,
    DocumentMissing,
    PlanStalled,
}

impl AlertKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EligibilityGap => "eligibility_gap",
            Self::ClaimDenied => "claim_denied",
            Self::DocumentMissing => "document_missing",
            Self::PlanStalled => "plan_stalled",
        }
    }
}

impl FromStr for AlertKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eligibility_gap" => Ok(Self::EligibilityGap),
            "claim_denied" => Ok(Self::ClaimDenied),
            "document_missing" => Ok(Self::DocumentMissing),
            "plan_stalled" => Ok(Self::PlanStalled),
            other => Err(UnknownVariant::new("alert kind", other)),
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification addressed to one user, optionally tied to a patient.
///
/// Created by business triggers; the only permitted mutation is flipping the
/// read flag on acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAlert {
    pub id: AlertId,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub patient_id: Option<PatientId>,
    pub priority: AlertPriority,
    pub kind: AlertKind,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
