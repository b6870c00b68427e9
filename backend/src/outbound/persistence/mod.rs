//! Diesel-backed persistence adapters for the repository ports.

mod diesel_alert_repository;
mod diesel_error_mapping;
mod diesel_milestone_repository;
mod diesel_owned_task_repository;
mod diesel_patient_repository;
mod diesel_plan_repository;
mod migrations;
mod models;
mod pool;
pub mod schema;

pub use diesel_alert_repository::DieselAlertRepository;
pub use diesel_milestone_repository::DieselMilestoneRepository;
pub use diesel_owned_task_repository::DieselOwnedTaskRepository;
pub use diesel_patient_repository::DieselPatientRepository;
pub use diesel_plan_repository::DieselPlanRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
