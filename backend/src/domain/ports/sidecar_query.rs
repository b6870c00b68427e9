//! Driving port for the sidecar state read.

use async_trait::async_trait;

use crate::domain::sidecar::{ReadinessSummary, SidecarState};
use crate::domain::{
    AttentionStatus, DisplayColor, Error, PatientId, ReadinessStatus, TenantId, UserId,
};

/// Request to build the aggregated sidecar view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidecarStateRequest {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub patient_id: PatientId,
}

/// Port for the composite sidecar read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SidecarQuery: Send + Sync {
    /// Build the sidecar state for a patient as seen by a user.
    ///
    /// Pure read: raises not-found for unknown patients and never mutates
    /// state.
    async fn state(&self, request: SidecarStateRequest) -> Result<SidecarState, Error>;
}

/// Fixture implementation returning an empty, on-track sidecar for any
/// patient.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSidecarQuery;

#[async_trait]
impl SidecarQuery for FixtureSidecarQuery {
    async fn state(&self, request: SidecarStateRequest) -> Result<SidecarState, Error> {
        Ok(SidecarState {
            patient_id: request.patient_id,
            patient_display_name: "Fixture Patient".to_owned(),
            readiness: ReadinessSummary {
                probability: 0.9,
                status: ReadinessStatus::OnTrack,
                color: DisplayColor::Green,
                attention_status: AttentionStatus::Normal,
                resolved_until: None,
            },
            bottlenecks: Vec::new(),
            milestones: Vec::new(),
            unread_alerts: 0,
            owned_tasks: Vec::new(),
        })
    }
}
