//! Sidecar aggregation service.
//!
//! Joins patient context, open plan steps, milestones, the unread alert
//! count, and owned tasks into the single view model the UI renders. Pure
//! read: unknown patients are not-found, and nothing is mutated.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    AlertRepository, AlertRepositoryError, MilestoneRepository, MilestoneRepositoryError,
    OwnedTaskRepository, OwnedTaskRepositoryError, PatientRepository, PatientRepositoryError,
    PlanRepository, PlanRepositoryError, SidecarQuery, SidecarStateRequest,
};
use crate::domain::sidecar::{
    BottleneckItem, MilestoneSummary, OwnedTaskSummary, ReadinessSummary, SidecarState,
};
use crate::domain::{Error, readiness};

fn map_patient_error(error: PatientRepositoryError) -> Error {
    match error {
        PatientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("patient repository unavailable: {message}"))
        }
        PatientRepositoryError::Query { message } => {
            Error::internal(format!("patient repository error: {message}"))
        }
    }
}

fn map_plan_error(error: PlanRepositoryError) -> Error {
    match error {
        PlanRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("plan repository unavailable: {message}"))
        }
        PlanRepositoryError::Query { message } => {
            Error::internal(format!("plan repository error: {message}"))
        }
        PlanRepositoryError::AlreadyAnswered { message } => {
            Error::conflict(format!("step already answered: {message}"))
        }
    }
}

fn map_milestone_error(error: MilestoneRepositoryError) -> Error {
    match error {
        MilestoneRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("milestone repository unavailable: {message}"))
        }
        MilestoneRepositoryError::Query { message } => {
            Error::internal(format!("milestone repository error: {message}"))
        }
    }
}

fn map_alert_error(error: AlertRepositoryError) -> Error {
    match error {
        AlertRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("alert repository unavailable: {message}"))
        }
        AlertRepositoryError::Query { message } => {
            Error::internal(format!("alert repository error: {message}"))
        }
    }
}

fn map_owned_task_error(error: OwnedTaskRepositoryError) -> Error {
    match error {
        OwnedTaskRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("owned task repository unavailable: {message}"))
        }
        OwnedTaskRepositoryError::Query { message } => {
            Error::internal(format!("owned task repository error: {message}"))
        }
    }
}

/// Sidecar service implementing the [`SidecarQuery`] driving port.
pub struct SidecarService {
    patients: Arc<dyn PatientRepository>,
    plans: Arc<dyn PlanRepository>,
    milestones: Arc<dyn MilestoneRepository>,
    alerts: Arc<dyn AlertRepository>,
    owned_tasks: Arc<dyn OwnedTaskRepository>,
    clock: Arc<dyn Clock>,
}

impl SidecarService {
    /// Create the service over its repository ports and a clock.
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        plans: Arc<dyn PlanRepository>,
        milestones: Arc<dyn MilestoneRepository>,
        alerts: Arc<dyn AlertRepository>,
        owned_tasks: Arc<dyn OwnedTaskRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            patients,
            plans,
            milestones,
            alerts,
            owned_tasks,
            clock,
        }
    }
}

#[async_trait]
impl SidecarQuery for SidecarService {
    async fn state(&self, request: SidecarStateRequest) -> Result<SidecarState, Error> {
        let SidecarStateRequest {
            tenant_id,
            user_id,
            patient_id,
        } = request;

        let patient = self
            .patients
            .find_by_id(&tenant_id, &patient_id)
            .await
            .map_err(map_patient_error)?
            .ok_or_else(|| Error::not_found(format!("patient {patient_id} not found")))?;

        let status = readiness::readiness_status(patient.readiness_probability);
        let color = readiness::display_color(&patient, status, self.clock.utc());

        let bottlenecks = self
            .plans
            .list_open_steps(&tenant_id, &patient_id)
            .await
            .map_err(map_plan_error)?
            .into_iter()
            .map(|step| BottleneckItem {
                step_id: step.id,
                plan_id: step.plan_id,
                title: step.title,
                step_type: step.step_type,
                input_type: step.input_type,
                status: step.status,
                priority: step.priority,
                position: step.position,
            })
            .collect();

        let milestones = self
            .milestones
            .list_for_patient(&tenant_id, &patient_id)
            .await
            .map_err(map_milestone_error)?
            .into_iter()
            .map(|entry| MilestoneSummary {
                id: entry.milestone.id,
                kind: entry.milestone.kind,
                status: entry.milestone.status,
                occurred_at: entry.milestone.occurred_at,
                latest_note: entry.latest.as_ref().and_then(|h| h.note.clone()),
                latest_recorded_at: entry.latest.map(|h| h.recorded_at),
            })
            .collect();

        let unread_alerts = self
            .alerts
            .unread_count(&tenant_id, &user_id)
            .await
            .map_err(map_alert_error)?;

        let owned_tasks = self
            .owned_tasks
            .list_for_user(&tenant_id, &user_id)
            .await
            .map_err(map_owned_task_error)?
            .into_iter()
            .map(|task| OwnedTaskSummary {
                id: task.id,
                step_id: task.step_id,
                status: task.status,
                actor_user_id: task.actor_user_id,
                updated_at: task.updated_at,
            })
            .collect();

        Ok(SidecarState {
            patient_id: patient.id,
            patient_display_name: patient.display_name.clone(),
            readiness: ReadinessSummary {
                probability: patient.readiness_probability,
                status,
                color,
                attention_status: patient.attention_status,
                resolved_until: patient.resolved_until,
            },
            bottlenecks,
            milestones,
            unread_alerts,
            owned_tasks,
        })
    }
}

#[cfg(test)]
#[path = "sidecar_service_tests.rs"]
mod tests;
