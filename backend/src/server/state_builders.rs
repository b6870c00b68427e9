//! Builders for HTTP state ports.
//!
//! Each builder selects a database-backed service when a pool is configured
//! and a fixture otherwise, so the server always starts with a complete port
//! bundle.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use careside::domain::ports::{
    AlertsCommand, AlertsQuery, AssignmentCommand, ChatDelegate, ConversationAgent,
    FixtureAlertRepository, FixtureAssignmentCommand, FixtureConversationAgent,
    FixtureLoginService, FixturePatientCommand, FixturePlanCommand, FixtureSidecarQuery,
    PatientCommand, PlanCommand, SidecarQuery,
};
use careside::domain::{
    AssignmentService, ChatService, PatientCommandService, PlanCommandService, SidecarService,
    UserAlertsService,
};
use careside::inbound::http::state::{HttpState, HttpStatePorts};
use careside::outbound::agent::HttpConversationAgent;
use careside::outbound::persistence::{
    DbPool, DieselAlertRepository, DieselMilestoneRepository, DieselOwnedTaskRepository,
    DieselPatientRepository, DieselPlanRepository,
};

use super::ServerConfig;

fn build_sidecar_query(pool: &DbPool) -> Arc<dyn SidecarQuery> {
    Arc::new(SidecarService::new(
        Arc::new(DieselPatientRepository::new(pool.clone())),
        Arc::new(DieselPlanRepository::new(pool.clone())),
        Arc::new(DieselMilestoneRepository::new(pool.clone())),
        Arc::new(DieselAlertRepository::new(pool.clone())),
        Arc::new(DieselOwnedTaskRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    ))
}

fn build_patient_command(pool: &DbPool) -> Arc<dyn PatientCommand> {
    Arc::new(PatientCommandService::new(Arc::new(
        DieselPatientRepository::new(pool.clone()),
    )))
}

fn build_plan_command(pool: &DbPool) -> Arc<dyn PlanCommand> {
    Arc::new(PlanCommandService::new(
        Arc::new(DieselPlanRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    ))
}

fn build_assignments(pool: &DbPool) -> Arc<dyn AssignmentCommand> {
    Arc::new(AssignmentService::new(
        Arc::new(DieselPlanRepository::new(pool.clone())),
        Arc::new(DieselOwnedTaskRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    ))
}

fn build_alerts_pair(pool: &DbPool) -> (Arc<dyn AlertsQuery>, Arc<dyn AlertsCommand>) {
    let service = Arc::new(UserAlertsService::new(Arc::new(DieselAlertRepository::new(
        pool.clone(),
    ))));
    (service.clone(), service)
}

fn build_chat(agent_url: Option<&str>) -> Arc<dyn ChatDelegate> {
    let agent: Arc<dyn ConversationAgent> = match agent_url {
        Some(url) => match HttpConversationAgent::new(url) {
            Ok(agent) => Arc::new(agent),
            Err(error) => {
                warn!(%error, "agent client construction failed; using fixture agent");
                Arc::new(FixtureConversationAgent)
            }
        },
        None => {
            warn!("no agent service configured; chat uses the fixture agent");
            Arc::new(FixtureConversationAgent)
        }
    };
    Arc::new(ChatService::new(agent))
}

/// Build the shared HTTP state from the server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            let (alerts, alerts_command) = build_alerts_pair(pool);
            HttpStatePorts {
                login: Arc::new(FixtureLoginService),
                sidecar: build_sidecar_query(pool),
                patient_commands: build_patient_command(pool),
                plan_commands: build_plan_command(pool),
                assignments: build_assignments(pool),
                alerts,
                alerts_command,
                chat: build_chat(config.agent_url.as_deref()),
            }
        }
        None => {
            warn!("no database configured; HTTP ports use fixtures");
            // Fixture alert repository keeps the service path exercised even
            // without a pool.
            let alerts_service = Arc::new(UserAlertsService::new(Arc::new(
                FixtureAlertRepository,
            )));
            HttpStatePorts {
                login: Arc::new(FixtureLoginService),
                sidecar: Arc::new(FixtureSidecarQuery),
                patient_commands: Arc::new(FixturePatientCommand),
                plan_commands: Arc::new(FixturePlanCommand),
                assignments: Arc::new(FixtureAssignmentCommand),
                alerts: alerts_service.clone(),
                alerts_command: alerts_service,
                chat: build_chat(config.agent_url.as_deref()),
            }
        }
    };

    web::Data::new(HttpState::new(ports))
}
