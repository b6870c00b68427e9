//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Row-to-domain conversion goes through validated constructors in
//! the repositories.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    milestone_history, milestones, patient_contexts, plan_steps, step_answers, user_alerts,
    user_owned_tasks,
};

/// Row struct for reading from the patient_contexts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patient_contexts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatientContextRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub display_name: String,
    pub attention_status: String,
    pub override_color: Option<String>,
    pub resolved_until: Option<DateTime<Utc>>,
    pub readiness_probability: f64,
    pub factor_overrides: serde_json::Value,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for the override endpoint's partial update. `None`
/// fields are skipped by Diesel.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = patient_contexts)]
pub(crate) struct PatientOverrideUpdate<'a> {
    pub attention_status: Option<&'a str>,
    pub override_color: Option<&'a str>,
    pub resolved_until: Option<DateTime<Utc>>,
    pub factor_overrides: Option<&'a serde_json::Value>,
}

/// Row struct for reading from the plan_steps table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = plan_steps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlanStepRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub plan_id: Uuid,
    pub title: String,
    pub step_type: String,
    pub input_type: String,
    pub status: String,
    pub priority: i32,
    pub position: i32,
}

/// Insertable struct for recording step answers.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = step_answers)]
pub(crate) struct NewStepAnswerRow<'a> {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub step_id: Uuid,
    pub answer_mode: &'a str,
    pub payload: &'a serde_json::Value,
    pub recorded_by: Uuid,
    pub recorded_at: DateTime<Utc>,
}

/// Row struct for reading from the milestones table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = milestones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MilestoneRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub patient_id: Uuid,
    pub kind: String,
    pub status: String,
    pub occurred_at: Option<DateTime<Utc>>,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the milestone_history table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = milestone_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MilestoneHistoryRow {
    pub id: Uuid,
    pub milestone_id: Uuid,
    pub status: String,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Row struct for reading from the user_alerts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_alerts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserAlertRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub patient_id: Option<Uuid>,
    pub priority: String,
    pub kind: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the user_owned_tasks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_owned_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OwnedTaskRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner_user_id: Uuid,
    pub step_id: Uuid,
    pub status: String,
    pub actor_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating ownership claims.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_owned_tasks)]
pub(crate) struct NewOwnedTaskRow<'a> {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner_user_id: Uuid,
    pub step_id: Uuid,
    pub status: &'a str,
    pub actor_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for replacing an existing ownership claim.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_owned_tasks)]
pub(crate) struct OwnedTaskUpdate<'a> {
    pub owner_user_id: Uuid,
    pub status: &'a str,
    pub actor_user_id: Uuid,
    pub updated_at: DateTime<Utc>,
}
