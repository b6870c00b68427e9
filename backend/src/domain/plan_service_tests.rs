//! Behaviour coverage for the plan command service.

use std::sync::Arc;

use mockable::DefaultClock;
use serde_json::json;

use super::*;
use crate::domain::ports::MockPlanRepository;
use crate::domain::{ErrorCode, InputType, PatientId, PlanId, StepType, UserId};

fn step(tenant_id: TenantId, step_id: StepId, status: StepStatus) -> PlanStep {
    PlanStep {
        id: step_id,
        plan_id: PlanId::random(),
        tenant_id,
        title: "Collect referral".to_owned(),
        step_type: StepType::Document,
        input_type: InputType::File,
        status,
        priority: 3,
        position: 0,
    }
}

fn service(plans: MockPlanRepository) -> PlanCommandService {
    PlanCommandService::new(Arc::new(plans), Arc::new(DefaultClock))
}

fn answer_request(tenant_id: TenantId, step_id: StepId) -> RecordAnswerRequest {
    RecordAnswerRequest {
        tenant_id,
        user_id: UserId::random(),
        patient_id: PatientId::random(),
        step_id,
        payload: json!({ "value": "referral-42.pdf" }),
    }
}

#[tokio::test]
async fn answer_resolves_an_open_step() {
    let tenant_id = TenantId::random();
    let step_id = StepId::random();
    let mut plans = MockPlanRepository::new();
    let found = step(tenant_id, step_id, StepStatus::InProgress);
    plans
        .expect_find_step()
        .returning(move |_, _| Ok(Some(found.clone())));
    plans
        .expect_record_answer()
        .withf(|answer, advance_to| {
            answer.answer_mode == AnswerMode::Value && *advance_to == Some(StepStatus::Resolved)
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let response = service(plans)
        .record_answer(answer_request(tenant_id, step_id))
        .await
        .expect("answer records");
    assert_eq!(response.step_id, step_id);
    assert_eq!(response.step_status, StepStatus::Resolved);
}

#[tokio::test]
async fn answering_a_resolved_step_is_a_conflict() {
    let tenant_id = TenantId::random();
    let step_id = StepId::random();
    let mut plans = MockPlanRepository::new();
    let found = step(tenant_id, step_id, StepStatus::Resolved);
    plans
        .expect_find_step()
        .returning(move |_, _| Ok(Some(found.clone())));
    // record_answer must not be reached.

    let err = service(plans)
        .record_answer(answer_request(tenant_id, step_id))
        .await
        .expect_err("resolved step rejects answers");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn duplicate_answer_surfaces_repository_conflict() {
    let tenant_id = TenantId::random();
    let step_id = StepId::random();
    let mut plans = MockPlanRepository::new();
    let found = step(tenant_id, step_id, StepStatus::Pending);
    plans
        .expect_find_step()
        .returning(move |_, _| Ok(Some(found.clone())));
    plans.expect_record_answer().returning(|_, _| {
        Err(PlanRepositoryError::already_answered("step already answered"))
    });

    let err = service(plans)
        .record_answer(answer_request(tenant_id, step_id))
        .await
        .expect_err("duplicate answer conflicts");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn unknown_step_is_not_found() {
    let mut plans = MockPlanRepository::new();
    plans.expect_find_step().returning(|_, _| Ok(None));

    let err = service(plans)
        .record_answer(answer_request(TenantId::random(), StepId::random()))
        .await
        .expect_err("missing step");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn note_leaves_the_step_open() {
    let tenant_id = TenantId::random();
    let step_id = StepId::random();
    let mut plans = MockPlanRepository::new();
    let found = step(tenant_id, step_id, StepStatus::Pending);
    plans
        .expect_find_step()
        .returning(move |_, _| Ok(Some(found.clone())));
    plans
        .expect_record_answer()
        .withf(|answer, advance_to| {
            answer.answer_mode == AnswerMode::Note
                && advance_to.is_none()
                && answer.payload.get("note").and_then(|n| n.as_str())
                    == Some("called the payer, waiting on fax")
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let response = service(plans)
        .record_note(RecordNoteRequest {
            tenant_id,
            user_id: UserId::random(),
            patient_id: PatientId::random(),
            step_id,
            note: "called the payer, waiting on fax".to_owned(),
        })
        .await
        .expect("note records");
    assert_eq!(response.step_id, step_id);
}

#[tokio::test]
async fn blank_note_is_invalid() {
    let plans = MockPlanRepository::new();

    let err = service(plans)
        .record_note(RecordNoteRequest {
            tenant_id: TenantId::random(),
            user_id: UserId::random(),
            patient_id: PatientId::random(),
            step_id: StepId::random(),
            note: "   ".to_owned(),
        })
        .await
        .expect_err("blank note rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
