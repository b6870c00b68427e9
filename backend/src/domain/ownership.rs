//! Ownership claims over bottlenecks.
//!
//! An owned task records that a user has taken responsibility for resolving
//! a plan step. One claim exists per step; transfers update the owner and
//! status in place.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::TenantId;
use super::patient::UnknownVariant;
use super::plan::StepId;
use super::user::UserId;

/// Opaque owned-task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnedTaskId(Uuid);

impl OwnedTaskId {
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

impl std::fmt::Display for OwnedTaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the ownership claim came about and where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedTaskStatus {
    /// Assigned to the owner by another user.
    Assigned,
    /// Claimed by the owner themselves.
    Claimed,
    /// Moved to a new owner after an earlier claim.
    Transferred,
    /// The underlying bottleneck was resolved.
    Completed,
}

impl OwnedTaskStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Claimed => "claimed",
            Self::Transferred => "transferred",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for OwnedTaskStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(Self::Assigned),
            "claimed" => Ok(Self::Claimed),
            "transferred" => Ok(Self::Transferred),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownVariant::new("owned task status", other)),
        }
    }
}

impl std::fmt::Display for OwnedTaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's ownership claim over a plan step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedTask {
    pub id: OwnedTaskId,
    pub tenant_id: TenantId,
    /// Who currently owns the bottleneck.
    pub owner_user_id: UserId,
    pub step_id: StepId,
    pub status: OwnedTaskStatus,
    /// Who performed the most recent ownership action (assigner or claimer).
    pub actor_user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
