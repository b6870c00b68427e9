//! Behaviour coverage for the sidecar aggregation service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    MockAlertRepository, MockMilestoneRepository, MockOwnedTaskRepository, MockPatientRepository,
    MockPlanRepository,
};
use crate::domain::{
    AttentionStatus, DisplayColor, InputType, MilestoneId, MilestoneKind, MilestoneStatus,
    OwnedTask, OwnedTaskId, OwnedTaskStatus, PatientContext, PatientId, PlanId, PlanStep,
    ReadinessStatus, StepId, StepStatus, StepType, TenantId, UserId,
};
use crate::domain::{ErrorCode, Milestone, MilestoneHistoryEntry, MilestoneWithLatest};

struct Mocks {
    patients: MockPatientRepository,
    plans: MockPlanRepository,
    milestones: MockMilestoneRepository,
    alerts: MockAlertRepository,
    owned_tasks: MockOwnedTaskRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            patients: MockPatientRepository::new(),
            plans: MockPlanRepository::new(),
            milestones: MockMilestoneRepository::new(),
            alerts: MockAlertRepository::new(),
            owned_tasks: MockOwnedTaskRepository::new(),
        }
    }

    fn into_service(self) -> SidecarService {
        SidecarService::new(
            Arc::new(self.patients),
            Arc::new(self.plans),
            Arc::new(self.milestones),
            Arc::new(self.alerts),
            Arc::new(self.owned_tasks),
            Arc::new(DefaultClock),
        )
    }
}

fn patient(tenant_id: TenantId, patient_id: PatientId, probability: f64) -> PatientContext {
    PatientContext {
        id: patient_id,
        tenant_id,
        display_name: "Jordan Reyes".to_owned(),
        attention_status: AttentionStatus::Normal,
        override_color: None,
        resolved_until: None,
        readiness_probability: probability,
        factor_overrides: json!({}),
    }
}

fn request() -> SidecarStateRequest {
    SidecarStateRequest {
        tenant_id: TenantId::random(),
        user_id: UserId::random(),
        patient_id: PatientId::random(),
    }
}

fn stub_empty_satellites(mocks: &mut Mocks, unread: i64) {
    mocks
        .plans
        .expect_list_open_steps()
        .returning(|_, _| Ok(Vec::new()));
    mocks
        .milestones
        .expect_list_for_patient()
        .returning(|_, _| Ok(Vec::new()));
    mocks
        .alerts
        .expect_unread_count()
        .returning(move |_, _| Ok(unread));
    mocks
        .owned_tasks
        .expect_list_for_user()
        .returning(|_, _| Ok(Vec::new()));
}

#[tokio::test]
async fn unknown_patient_is_not_found() {
    let mut mocks = Mocks::new();
    mocks.patients.expect_find_by_id().returning(|_, _| Ok(None));
    // The remaining repositories must not be consulted.
    let service = mocks.into_service();

    let err = service.state(request()).await.expect_err("missing patient");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(0.3, ReadinessStatus::AtRisk, DisplayColor::Red)]
#[case(0.6, ReadinessStatus::NeedsReview, DisplayColor::Amber)]
#[case(0.95, ReadinessStatus::OnTrack, DisplayColor::Green)]
#[tokio::test]
async fn empty_plan_yields_probability_driven_readiness(
    #[case] probability: f64,
    #[case] expected_status: ReadinessStatus,
    #[case] expected_color: DisplayColor,
) {
    let req = request();
    let mut mocks = Mocks::new();
    let p = patient(req.tenant_id, req.patient_id, probability);
    mocks
        .patients
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(p.clone())));
    stub_empty_satellites(&mut mocks, 0);
    let service = mocks.into_service();

    let state = service.state(req).await.expect("state builds");
    assert!(state.bottlenecks.is_empty());
    assert_eq!(state.readiness.status, expected_status);
    assert_eq!(state.readiness.color, expected_color);
}

#[tokio::test]
async fn future_resolved_until_turns_banner_green() {
    let req = request();
    let mut mocks = Mocks::new();
    let mut p = patient(req.tenant_id, req.patient_id, 0.2);
    p.resolved_until = Some(Utc::now() + Duration::days(3));
    mocks
        .patients
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(p.clone())));
    stub_empty_satellites(&mut mocks, 0);
    let service = mocks.into_service();

    let state = service.state(req).await.expect("state builds");
    assert_eq!(state.readiness.status, ReadinessStatus::AtRisk);
    assert_eq!(state.readiness.color, DisplayColor::Green);
}

#[tokio::test]
async fn aggregates_bottlenecks_milestones_alerts_and_tasks() {
    let req = request();
    let step_id = StepId::random();
    let plan_id = PlanId::random();
    let milestone_id = MilestoneId::random();
    let task_id = OwnedTaskId::random();

    let mut mocks = Mocks::new();
    let p = patient(req.tenant_id, req.patient_id, 0.7);
    mocks
        .patients
        .expect_find_by_id()
        .returning(move |_, _| Ok(Some(p.clone())));

    let tenant_id = req.tenant_id;
    mocks.plans.expect_list_open_steps().returning(move |_, _| {
        Ok(vec![PlanStep {
            id: step_id,
            plan_id,
            tenant_id,
            title: "Verify coverage".to_owned(),
            step_type: StepType::Verification,
            input_type: InputType::Confirmation,
            status: StepStatus::Pending,
            priority: 5,
            position: 1,
        }])
    });

    let recorded_at = Utc::now();
    let patient_id = req.patient_id;
    mocks
        .milestones
        .expect_list_for_patient()
        .returning(move |_, _| {
            Ok(vec![MilestoneWithLatest {
                milestone: Milestone {
                    id: milestone_id,
                    tenant_id,
                    patient_id,
                    kind: MilestoneKind::Eligibility,
                    status: MilestoneStatus::Reached,
                    occurred_at: Some(recorded_at),
                },
                latest: Some(MilestoneHistoryEntry {
                    id: Uuid::new_v4(),
                    milestone_id,
                    status: MilestoneStatus::Reached,
                    note: Some("payer confirmed".to_owned()),
                    recorded_at,
                }),
            }])
        });

    mocks.alerts.expect_unread_count().returning(|_, _| Ok(4));

    let owner = req.user_id;
    mocks
        .owned_tasks
        .expect_list_for_user()
        .returning(move |_, _| {
            Ok(vec![OwnedTask {
                id: task_id,
                tenant_id,
                owner_user_id: owner,
                step_id,
                status: OwnedTaskStatus::Claimed,
                actor_user_id: owner,
                created_at: recorded_at,
                updated_at: recorded_at,
            }])
        });

    let service = mocks.into_service();
    let state = service.state(req).await.expect("state builds");

    assert_eq!(state.bottlenecks.len(), 1);
    assert_eq!(state.bottlenecks[0].step_id, step_id);
    assert_eq!(state.bottlenecks[0].title, "Verify coverage");
    assert_eq!(state.milestones.len(), 1);
    assert_eq!(
        state.milestones[0].latest_note.as_deref(),
        Some("payer confirmed")
    );
    assert_eq!(state.unread_alerts, 4);
    assert_eq!(state.owned_tasks.len(), 1);
    assert_eq!(state.owned_tasks[0].status, OwnedTaskStatus::Claimed);
}

#[tokio::test]
async fn connection_failure_maps_to_service_unavailable() {
    let mut mocks = Mocks::new();
    mocks.patients.expect_find_by_id().returning(|_, _| {
        Err(PatientRepositoryError::connection("pool exhausted"))
    });
    let service = mocks.into_service();

    let err = service.state(request()).await.expect_err("pool failure");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
