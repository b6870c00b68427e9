//! Patient context snapshot.
//!
//! A patient context is the per-patient status row the sidecar reads: the
//! operator-facing attention flag, an optional display-colour override, an
//! optional "resolved until" horizon, the current payment-readiness
//! probability, and semi-structured factor overrides.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::TenantId;

/// Opaque patient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatientId(Uuid);

/// Validation errors for patient identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientIdValidationError {
    #[error("patient id must be a valid UUID")]
    InvalidUuid,
}

impl PatientId {
    /// Parse a patient id from its canonical string form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PatientIdValidationError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| PatientIdValidationError::InvalidUuid)
    }

    /// Wrap an already-validated UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Borrow the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generate a random patient id (test fixtures).
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operator-facing attention flag on a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionStatus {
    /// Nothing requires operator attention.
    Normal,
    /// The patient is being watched for a developing gap.
    Watch,
    /// The patient needs immediate operator attention.
    Urgent,
}

impl AttentionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Watch => "watch",
            Self::Urgent => "urgent",
        }
    }
}

impl FromStr for AttentionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "watch" => Ok(Self::Watch),
            "urgent" => Ok(Self::Urgent),
            other => Err(UnknownVariant::new("attention status", other)),
        }
    }
}

impl std::fmt::Display for AttentionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI display colour for a patient's readiness banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayColor {
    Green,
    Amber,
    Red,
}

impl DisplayColor {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }
}

impl FromStr for DisplayColor {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(Self::Green),
            "amber" => Ok(Self::Amber),
            "red" => Ok(Self::Red),
            other => Err(UnknownVariant::new("display colour", other)),
        }
    }
}

impl std::fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when decoding an enumerated column value fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// A patient's current status snapshot.
///
/// Created on intake, mutated by status-change and override endpoints, never
/// hard-deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientContext {
    pub id: PatientId,
    pub tenant_id: TenantId,
    pub display_name: String,
    pub attention_status: AttentionStatus,
    pub override_color: Option<DisplayColor>,
    pub resolved_until: Option<DateTime<Utc>>,
    /// Payment/readiness probability in `[0, 1]`.
    pub readiness_probability: f64,
    /// Semi-structured per-factor overrides recorded by operators.
    pub factor_overrides: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("normal", AttentionStatus::Normal)]
    #[case("watch", AttentionStatus::Watch)]
    #[case("urgent", AttentionStatus::Urgent)]
    fn attention_status_round_trips(#[case] raw: &str, #[case] expected: AttentionStatus) {
        assert_eq!(raw.parse::<AttentionStatus>().expect("known value"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[test]
    fn unknown_attention_status_is_rejected() {
        let err = "escalated"
            .parse::<AttentionStatus>()
            .expect_err("unknown value should fail");
        assert!(err.to_string().contains("escalated"));
    }

    #[rstest]
    #[case("green", DisplayColor::Green)]
    #[case("amber", DisplayColor::Amber)]
    #[case("red", DisplayColor::Red)]
    fn display_color_round_trips(#[case] raw: &str, #[case] expected: DisplayColor) {
        assert_eq!(raw.parse::<DisplayColor>().expect("known value"), expected);
        assert_eq!(expected.as_str(), raw);
    }
}
