//! Sidecar HTTP handlers.
//!
//! ```text
//! GET  /api/v1/sidecar/state?patientId=…
//! POST /api/v1/sidecar/answer
//! POST /api/v1/sidecar/note
//! POST /api/v1/sidecar/assign
//! POST /api/v1/sidecar/assign-bulk
//! POST /api/v1/sidecar/own
//! POST /api/v1/sidecar/override
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ApplyOverridesRequest, AssignBulkRequest, AssignRequest, AssignResponse, OwnRequest,
    PatientOverrideChanges, RecordAnswerRequest, RecordNoteRequest, SidecarStateRequest,
};
use crate::domain::sidecar::SidecarState;
use crate::domain::{AttentionStatus, DisplayColor, Error, PatientId, StepId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_required_uuid, parse_rfc3339_timestamp, parse_uuid_list, require_field,
};

/// Query parameters for the sidecar state read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateQuery {
    pub patient_id: Option<String>,
}

/// Readiness banner payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessBody {
    pub probability: f64,
    pub status: String,
    pub color: String,
    pub attention_status: String,
    #[schema(format = "date-time")]
    pub resolved_until: Option<String>,
}

/// Open bottleneck payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BottleneckBody {
    #[schema(format = "uuid")]
    pub step_id: String,
    #[schema(format = "uuid")]
    pub plan_id: String,
    pub title: String,
    pub step_type: String,
    pub input_type: String,
    pub status: String,
    pub priority: i32,
    pub position: i32,
}

/// Milestone payload with its latest audit point.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub kind: String,
    pub status: String,
    #[schema(format = "date-time")]
    pub occurred_at: Option<String>,
    pub latest_note: Option<String>,
    #[schema(format = "date-time")]
    pub latest_recorded_at: Option<String>,
}

/// Owned task payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnedTaskBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub step_id: String,
    pub status: String,
    #[schema(format = "uuid")]
    pub actor_user_id: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

/// Aggregated sidecar state response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SidecarStateBody {
    #[schema(format = "uuid")]
    pub patient_id: String,
    pub patient_display_name: String,
    pub readiness: ReadinessBody,
    pub bottlenecks: Vec<BottleneckBody>,
    pub milestones: Vec<MilestoneBody>,
    pub unread_alerts: i64,
    pub owned_tasks: Vec<OwnedTaskBody>,
}

impl From<SidecarState> for SidecarStateBody {
    fn from(state: SidecarState) -> Self {
        Self {
            patient_id: state.patient_id.to_string(),
            patient_display_name: state.patient_display_name,
            readiness: ReadinessBody {
                probability: state.readiness.probability,
                status: state.readiness.status.as_str().to_owned(),
                color: state.readiness.color.as_str().to_owned(),
                attention_status: state.readiness.attention_status.as_str().to_owned(),
                resolved_until: state.readiness.resolved_until.map(|t| t.to_rfc3339()),
            },
            bottlenecks: state
                .bottlenecks
                .into_iter()
                .map(|item| BottleneckBody {
                    step_id: item.step_id.to_string(),
                    plan_id: item.plan_id.to_string(),
                    title: item.title,
                    step_type: item.step_type.as_str().to_owned(),
                    input_type: item.input_type.as_str().to_owned(),
                    status: item.status.as_str().to_owned(),
                    priority: item.priority,
                    position: item.position,
                })
                .collect(),
            milestones: state
                .milestones
                .into_iter()
                .map(|item| MilestoneBody {
                    id: item.id.to_string(),
                    kind: item.kind.as_str().to_owned(),
                    status: item.status.as_str().to_owned(),
                    occurred_at: item.occurred_at.map(|t| t.to_rfc3339()),
                    latest_note: item.latest_note,
                    latest_recorded_at: item.latest_recorded_at.map(|t| t.to_rfc3339()),
                })
                .collect(),
            unread_alerts: state.unread_alerts,
            owned_tasks: state
                .owned_tasks
                .into_iter()
                .map(|task| OwnedTaskBody {
                    id: task.id.to_string(),
                    step_id: task.step_id.to_string(),
                    status: task.status.as_str().to_owned(),
                    actor_user_id: task.actor_user_id.to_string(),
                    updated_at: task.updated_at.to_rfc3339(),
                })
                .collect(),
        }
    }
}

/// Read the aggregated sidecar state for a patient.
#[utoipa::path(
    get,
    path = "/api/v1/sidecar/state",
    params(("patientId" = String, Query, description = "Patient identifier (UUID)")),
    responses(
        (status = 200, description = "Aggregated sidecar state", body = SidecarStateBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Unknown patient", body = ErrorSchema)
    ),
    tags = ["sidecar"],
    operation_id = "sidecarState",
    security(("SessionCookie" = []))
)]
#[get("/sidecar/state")]
pub async fn sidecar_state(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<StateQuery>,
) -> ApiResult<web::Json<SidecarStateBody>> {
    let identity = session.require_identity()?;
    let patient_id = parse_required_uuid(query.into_inner().patient_id, FieldName::new("patientId"))?;

    let sidecar = state
        .sidecar
        .state(SidecarStateRequest {
            tenant_id: identity.tenant_id,
            user_id: identity.user_id,
            patient_id: PatientId::from_uuid(patient_id),
        })
        .await?;

    Ok(web::Json(SidecarStateBody::from(sidecar)))
}

/// Request payload for answering a plan step.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequestBody {
    #[schema(format = "uuid")]
    pub patient_id: Option<String>,
    #[schema(format = "uuid")]
    pub step_id: Option<String>,
    /// Structured answer payload recorded verbatim.
    pub payload: Option<serde_json::Value>,
}

/// Response payload after answering a step.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponseBody {
    #[schema(format = "uuid")]
    pub answer_id: String,
    #[schema(format = "uuid")]
    pub step_id: String,
    pub step_status: String,
}

/// Record an immutable answer and resolve the step.
#[utoipa::path(
    post,
    path = "/api/v1/sidecar/answer",
    request_body = AnswerRequestBody,
    responses(
        (status = 201, description = "Answer recorded", body = AnswerResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Unknown step", body = ErrorSchema),
        (status = 409, description = "Step already answered", body = ErrorSchema)
    ),
    tags = ["sidecar"],
    operation_id = "answerStep",
    security(("SessionCookie" = []))
)]
#[post("/sidecar/answer")]
pub async fn answer_step(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AnswerRequestBody>,
) -> ApiResult<actix_web::HttpResponse> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let patient_id = parse_required_uuid(body.patient_id, FieldName::new("patientId"))?;
    let step_id = parse_required_uuid(body.step_id, FieldName::new("stepId"))?;
    let answer_payload = require_field(body.payload, FieldName::new("payload"))?;

    let response = state
        .plan_commands
        .record_answer(RecordAnswerRequest {
            tenant_id: identity.tenant_id,
            user_id: identity.user_id,
            patient_id: PatientId::from_uuid(patient_id),
            step_id: StepId::from_uuid(step_id),
            payload: answer_payload,
        })
        .await?;

    Ok(actix_web::HttpResponse::Created().json(AnswerResponseBody {
        answer_id: response.answer_id.to_string(),
        step_id: response.step_id.to_string(),
        step_status: response.step_status.as_str().to_owned(),
    }))
}

/// Request payload for attaching a note to a step.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequestBody {
    #[schema(format = "uuid")]
    pub patient_id: Option<String>,
    #[schema(format = "uuid")]
    pub step_id: Option<String>,
    pub note: Option<String>,
}

/// Response payload after recording a note.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponseBody {
    #[schema(format = "uuid")]
    pub answer_id: String,
    #[schema(format = "uuid")]
    pub step_id: String,
}

/// Attach a free-text note to a step without advancing it.
#[utoipa::path(
    post,
    path = "/api/v1/sidecar/note",
    request_body = NoteRequestBody,
    responses(
        (status = 201, description = "Note recorded", body = NoteResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Unknown step", body = ErrorSchema)
    ),
    tags = ["sidecar"],
    operation_id = "noteStep",
    security(("SessionCookie" = []))
)]
#[post("/sidecar/note")]
pub async fn note_step(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NoteRequestBody>,
) -> ApiResult<actix_web::HttpResponse> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let patient_id = parse_required_uuid(body.patient_id, FieldName::new("patientId"))?;
    let step_id = parse_required_uuid(body.step_id, FieldName::new("stepId"))?;
    let note = require_field(body.note, FieldName::new("note"))?;

    let response = state
        .plan_commands
        .record_note(RecordNoteRequest {
            tenant_id: identity.tenant_id,
            user_id: identity.user_id,
            patient_id: PatientId::from_uuid(patient_id),
            step_id: StepId::from_uuid(step_id),
            note,
        })
        .await?;

    Ok(actix_web::HttpResponse::Created().json(NoteResponseBody {
        answer_id: response.answer_id.to_string(),
        step_id: response.step_id.to_string(),
    }))
}

/// Request payload for assigning a bottleneck to a user.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequestBody {
    #[schema(format = "uuid")]
    pub step_id: Option<String>,
    #[schema(format = "uuid")]
    pub assignee_user_id: Option<String>,
}

/// Response payload for ownership mutations.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipResponseBody {
    #[schema(format = "uuid")]
    pub task_id: String,
    #[schema(format = "uuid")]
    pub step_id: String,
    pub status: String,
}

impl From<AssignResponse> for OwnershipResponseBody {
    fn from(response: AssignResponse) -> Self {
        Self {
            task_id: response.task_id.to_string(),
            step_id: response.step_id.to_string(),
            status: response.status.as_str().to_owned(),
        }
    }
}

/// Assign ownership of a bottleneck to a user.
#[utoipa::path(
    post,
    path = "/api/v1/sidecar/assign",
    request_body = AssignRequestBody,
    responses(
        (status = 200, description = "Ownership assigned", body = OwnershipResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Unknown step", body = ErrorSchema)
    ),
    tags = ["sidecar"],
    operation_id = "assignStep",
    security(("SessionCookie" = []))
)]
#[post("/sidecar/assign")]
pub async fn assign_step(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AssignRequestBody>,
) -> ApiResult<web::Json<OwnershipResponseBody>> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let step_id = parse_required_uuid(body.step_id, FieldName::new("stepId"))?;
    let assignee =
        parse_required_uuid(body.assignee_user_id, FieldName::new("assigneeUserId"))?;

    let response = state
        .assignments
        .assign(AssignRequest {
            tenant_id: identity.tenant_id,
            actor_user_id: identity.user_id,
            assignee_user_id: UserId::from_uuid(assignee),
            step_id: StepId::from_uuid(step_id),
        })
        .await?;

    Ok(web::Json(OwnershipResponseBody::from(response)))
}

/// Request payload for assigning several bottlenecks at once.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignBulkRequestBody {
    #[schema(format = "uuid")]
    pub assignee_user_id: Option<String>,
    /// Step identifiers to assign. An empty list is a no-op.
    #[schema(value_type = Vec<uuid::Uuid>)]
    pub step_ids: Option<Vec<String>>,
}

/// Response payload for bulk assignment.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignBulkResponseBody {
    pub assigned: usize,
}

/// Assign ownership of several bottlenecks to one user.
#[utoipa::path(
    post,
    path = "/api/v1/sidecar/assign-bulk",
    request_body = AssignBulkRequestBody,
    responses(
        (status = 200, description = "Ownership assigned", body = AssignBulkResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Unknown step", body = ErrorSchema)
    ),
    tags = ["sidecar"],
    operation_id = "assignStepsBulk",
    security(("SessionCookie" = []))
)]
#[post("/sidecar/assign-bulk")]
pub async fn assign_bulk(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AssignBulkRequestBody>,
) -> ApiResult<web::Json<AssignBulkResponseBody>> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let assignee =
        parse_required_uuid(body.assignee_user_id, FieldName::new("assigneeUserId"))?;
    let step_ids = parse_uuid_list(
        require_field(body.step_ids, FieldName::new("stepIds"))?,
        FieldName::new("stepIds"),
    )?;

    let response = state
        .assignments
        .assign_bulk(AssignBulkRequest {
            tenant_id: identity.tenant_id,
            actor_user_id: identity.user_id,
            assignee_user_id: UserId::from_uuid(assignee),
            step_ids: step_ids.into_iter().map(StepId::from_uuid).collect(),
        })
        .await?;

    Ok(web::Json(AssignBulkResponseBody {
        assigned: response.assigned,
    }))
}

/// Request payload for the session user claiming a bottleneck.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnRequestBody {
    #[schema(format = "uuid")]
    pub step_id: Option<String>,
}

/// Claim ownership of a bottleneck for the session user.
#[utoipa::path(
    post,
    path = "/api/v1/sidecar/own",
    request_body = OwnRequestBody,
    responses(
        (status = 200, description = "Ownership claimed", body = OwnershipResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Unknown step", body = ErrorSchema)
    ),
    tags = ["sidecar"],
    operation_id = "ownStep",
    security(("SessionCookie" = []))
)]
#[post("/sidecar/own")]
pub async fn own_step(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OwnRequestBody>,
) -> ApiResult<web::Json<OwnershipResponseBody>> {
    let identity = session.require_identity()?;
    let step_id = parse_required_uuid(payload.into_inner().step_id, FieldName::new("stepId"))?;

    let response = state
        .assignments
        .own(OwnRequest {
            tenant_id: identity.tenant_id,
            user_id: identity.user_id,
            step_id: StepId::from_uuid(step_id),
        })
        .await?;

    Ok(web::Json(OwnershipResponseBody::from(response)))
}

/// Request payload for the status-change/override mutation. Present fields
/// are set; absent fields are left untouched.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRequestBody {
    #[schema(format = "uuid")]
    pub patient_id: Option<String>,
    pub attention_status: Option<String>,
    pub override_color: Option<String>,
    #[schema(format = "date-time")]
    pub resolved_until: Option<String>,
    pub factor_overrides: Option<serde_json::Value>,
}

/// Response payload after applying overrides.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverrideResponseBody {
    #[schema(format = "uuid")]
    pub patient_id: String,
}

fn parse_override_changes(body: &OverrideRequestBody) -> Result<PatientOverrideChanges, Error> {
    let attention_status = body
        .attention_status
        .as_deref()
        .map(|raw| {
            raw.parse::<AttentionStatus>()
                .map_err(|err| Error::invalid_request(err.to_string()))
        })
        .transpose()?;
    let override_color = body
        .override_color
        .as_deref()
        .map(|raw| {
            raw.parse::<DisplayColor>()
                .map_err(|err| Error::invalid_request(err.to_string()))
        })
        .transpose()?;
    let resolved_until = body
        .resolved_until
        .as_deref()
        .map(|raw| parse_rfc3339_timestamp(raw, FieldName::new("resolvedUntil")))
        .transpose()?;

    Ok(PatientOverrideChanges {
        attention_status,
        override_color,
        resolved_until,
        factor_overrides: body.factor_overrides.clone(),
    })
}

/// Apply status-change and override fields to a patient context.
#[utoipa::path(
    post,
    path = "/api/v1/sidecar/override",
    request_body = OverrideRequestBody,
    responses(
        (status = 200, description = "Overrides applied", body = OverrideResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Unknown patient", body = ErrorSchema)
    ),
    tags = ["sidecar"],
    operation_id = "overridePatient",
    security(("SessionCookie" = []))
)]
#[post("/sidecar/override")]
pub async fn override_patient(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OverrideRequestBody>,
) -> ApiResult<web::Json<OverrideResponseBody>> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let patient_id = parse_required_uuid(body.patient_id.clone(), FieldName::new("patientId"))?;
    let changes = parse_override_changes(&body)?;

    let response = state
        .patient_commands
        .apply_overrides(ApplyOverridesRequest {
            tenant_id: identity.tenant_id,
            user_id: identity.user_id,
            patient_id: PatientId::from_uuid(patient_id),
            changes,
        })
        .await?;

    Ok(web::Json(OverrideResponseBody {
        patient_id: response.patient_id.to_string(),
    }))
}

#[cfg(test)]
#[path = "sidecar_tests.rs"]
mod tests;
