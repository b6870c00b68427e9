//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they depend
//! only on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AlertsCommand, AlertsQuery, AssignmentCommand, ChatDelegate, LoginService, PatientCommand,
    PlanCommand, SidecarQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub sidecar: Arc<dyn SidecarQuery>,
    pub patient_commands: Arc<dyn PatientCommand>,
    pub plan_commands: Arc<dyn PlanCommand>,
    pub assignments: Arc<dyn AssignmentCommand>,
    pub alerts: Arc<dyn AlertsQuery>,
    pub alerts_command: Arc<dyn AlertsCommand>,
    pub chat: Arc<dyn ChatDelegate>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub sidecar: Arc<dyn SidecarQuery>,
    pub patient_commands: Arc<dyn PatientCommand>,
    pub plan_commands: Arc<dyn PlanCommand>,
    pub assignments: Arc<dyn AssignmentCommand>,
    pub alerts: Arc<dyn AlertsQuery>,
    pub alerts_command: Arc<dyn AlertsCommand>,
    pub chat: Arc<dyn ChatDelegate>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            sidecar,
            patient_commands,
            plan_commands,
            assignments,
            alerts,
            alerts_command,
            chat,
        } = ports;
        Self {
            login,
            sidecar,
            patient_commands,
            plan_commands,
            assignments,
            alerts,
            alerts_command,
            chat,
        }
    }
}
