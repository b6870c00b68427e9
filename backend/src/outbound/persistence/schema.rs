//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// Tenants owning every other row.
    tenants (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Operations users within a tenant.
    users (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        display_name -> Varchar,
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-patient status snapshots read by the sidecar.
    patient_contexts (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        display_name -> Varchar,
        attention_status -> Varchar,
        override_color -> Nullable<Varchar>,
        resolved_until -> Nullable<Timestamptz>,
        readiness_probability -> Float8,
        factor_overrides -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Resolution plan headers.
    resolution_plans (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        patient_id -> Uuid,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Checklist steps belonging to a resolution plan.
    plan_steps (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        plan_id -> Uuid,
        title -> Varchar,
        step_type -> Varchar,
        input_type -> Varchar,
        status -> Varchar,
        priority -> Int4,
        position -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Immutable answers recorded against plan steps.
    step_answers (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        step_id -> Uuid,
        answer_mode -> Varchar,
        payload -> Jsonb,
        recorded_by -> Uuid,
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Care-journey milestones.
    milestones (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        patient_id -> Uuid,
        kind -> Varchar,
        status -> Varchar,
        occurred_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only milestone audit trail.
    milestone_history (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        milestone_id -> Uuid,
        status -> Varchar,
        note -> Nullable<Text>,
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Cross-patient notifications addressed to a user.
    user_alerts (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        user_id -> Uuid,
        patient_id -> Nullable<Uuid>,
        priority -> Varchar,
        kind -> Varchar,
        message -> Text,
        read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ownership claims over plan steps; one row per step.
    user_owned_tasks (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        owner_user_id -> Uuid,
        step_id -> Uuid,
        status -> Varchar,
        actor_user_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(plan_steps -> resolution_plans (plan_id));
diesel::joinable!(milestone_history -> milestones (milestone_id));
diesel::joinable!(step_answers -> plan_steps (step_id));
diesel::joinable!(user_owned_tasks -> plan_steps (step_id));

diesel::allow_tables_to_appear_in_same_query!(
    tenants,
    users,
    patient_contexts,
    resolution_plans,
    plan_steps,
    step_answers,
    milestones,
    milestone_history,
    user_alerts,
    user_owned_tasks,
);
