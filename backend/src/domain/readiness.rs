//! Readiness threshold and display-colour mapping.
//!
//! Two pure functions over fixed thresholds: one maps a payment/readiness
//! probability to a coarse status label, the other derives the banner colour
//! shown in the UI from the patient's override and attention fields.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::patient::{DisplayColor, PatientContext, UnknownVariant};

/// Probability at or above which a patient counts as on track.
pub const ON_TRACK_THRESHOLD: f64 = 0.80;

/// Probability at or above which a patient needs review rather than rescue.
pub const NEEDS_REVIEW_THRESHOLD: f64 = 0.50;

/// Coarse readiness status derived from the readiness probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessStatus {
    /// Probability at or above [`ON_TRACK_THRESHOLD`].
    OnTrack,
    /// Probability in `[NEEDS_REVIEW_THRESHOLD, ON_TRACK_THRESHOLD)`.
    NeedsReview,
    /// Probability below [`NEEDS_REVIEW_THRESHOLD`].
    AtRisk,
}

impl ReadinessStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::NeedsReview => "needs_review",
            Self::AtRisk => "at_risk",
        }
    }
}

impl FromStr for ReadinessStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_track" => Ok(Self::OnTrack),
            "needs_review" => Ok(Self::NeedsReview),
            "at_risk" => Ok(Self::AtRisk),
            other => Err(UnknownVariant::new("readiness status", other)),
        }
    }
}

impl std::fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a readiness probability onto its coarse status label.
///
/// Values outside `[0, 1]` are clamped by comparison: anything at or above
/// the upper threshold is on track, anything below the lower threshold is at
/// risk.
pub fn readiness_status(probability: f64) -> ReadinessStatus {
    if probability >= ON_TRACK_THRESHOLD {
        ReadinessStatus::OnTrack
    } else if probability >= NEEDS_REVIEW_THRESHOLD {
        ReadinessStatus::NeedsReview
    } else {
        ReadinessStatus::AtRisk
    }
}

/// Derive the banner colour for a patient.
///
/// Precedence: an operator override always wins; a `resolved_until` horizon
/// in the future forces green; otherwise the colour follows the readiness
/// status.
pub fn display_color(
    patient: &PatientContext,
    status: ReadinessStatus,
    now: DateTime<Utc>,
) -> DisplayColor {
    if let Some(color) = patient.override_color {
        return color;
    }
    if patient.resolved_until.is_some_and(|until| until > now) {
        return DisplayColor::Green;
    }
    match status {
        ReadinessStatus::OnTrack => DisplayColor::Green,
        ReadinessStatus::NeedsReview => DisplayColor::Amber,
        ReadinessStatus::AtRisk => DisplayColor::Red,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{AttentionStatus, PatientId, TenantId};

    fn patient() -> PatientContext {
        PatientContext {
            id: PatientId::from_uuid(Uuid::new_v4()),
            tenant_id: TenantId::random(),
            display_name: "Jordan Reyes".to_owned(),
            attention_status: AttentionStatus::Normal,
            override_color: None,
            resolved_until: None,
            readiness_probability: 0.9,
            factor_overrides: serde_json::json!({}),
        }
    }

    // Boundary cases on both thresholds, plus the interior of each band.
    #[rstest]
    #[case(0.0, ReadinessStatus::AtRisk)]
    #[case(0.49, ReadinessStatus::AtRisk)]
    #[case(0.50, ReadinessStatus::NeedsReview)]
    #[case(0.65, ReadinessStatus::NeedsReview)]
    #[case(0.79, ReadinessStatus::NeedsReview)]
    #[case(0.80, ReadinessStatus::OnTrack)]
    #[case(1.0, ReadinessStatus::OnTrack)]
    fn probability_maps_to_expected_status(
        #[case] probability: f64,
        #[case] expected: ReadinessStatus,
    ) {
        assert_eq!(readiness_status(probability), expected);
    }

    #[rstest]
    #[case(ReadinessStatus::OnTrack, DisplayColor::Green)]
    #[case(ReadinessStatus::NeedsReview, DisplayColor::Amber)]
    #[case(ReadinessStatus::AtRisk, DisplayColor::Red)]
    fn colour_follows_status_without_overrides(
        #[case] status: ReadinessStatus,
        #[case] expected: DisplayColor,
    ) {
        let now = Utc::now();
        assert_eq!(display_color(&patient(), status, now), expected);
    }

    #[test]
    fn operator_override_wins_over_everything() {
        let now = Utc::now();
        let mut p = patient();
        p.override_color = Some(DisplayColor::Red);
        p.resolved_until = Some(now + Duration::days(7));
        assert_eq!(
            display_color(&p, ReadinessStatus::OnTrack, now),
            DisplayColor::Red
        );
    }

    #[test]
    fn future_resolved_until_forces_green() {
        let now = Utc::now();
        let mut p = patient();
        p.resolved_until = Some(now + Duration::hours(1));
        assert_eq!(
            display_color(&p, ReadinessStatus::AtRisk, now),
            DisplayColor::Green
        );
    }

    #[test]
    fn expired_resolved_until_is_ignored() {
        let now = Utc::now();
        let mut p = patient();
        p.resolved_until = Some(now - Duration::hours(1));
        assert_eq!(
            display_color(&p, ReadinessStatus::AtRisk, now),
            DisplayColor::Red
        );
    }
}
