//! Backend entry-point: configuration, pool construction, and server start.

mod server;

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use careside::inbound::http::health::HealthState;
use careside::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::ServerConfig;

/// Environment-driven configuration; deployment mode (local vs. cloud
/// database) is selected by the database URL.
#[derive(Debug, Parser)]
#[command(name = "careside", about = "Healthcare operations backend")]
struct Cli {
    /// Socket address to bind the HTTP server to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// PostgreSQL connection URL. Fixture ports are used when absent.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Base URL of the conversation agent's message endpoint.
    #[arg(long, env = "AGENT_URL")]
    agent_url: Option<String>,

    /// Path to the session signing key.
    #[arg(long, env = "SESSION_KEY_FILE", default_value = "/var/run/secrets/session_key")]
    session_key_file: String,

    /// Whether session cookies require HTTPS.
    #[arg(
        long,
        env = "SESSION_COOKIE_SECURE",
        action = clap::ArgAction::Set,
        default_value_t = true
    )]
    cookie_secure: bool,
}

fn load_session_key(path: &str) -> std::io::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev =
                std::env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {path}: {e}"
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let key = load_session_key(&cli.session_key_file)?;

    let db_pool = match cli.database_url {
        Some(url) => {
            run_pending_migrations(url.clone())
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            Some(pool)
        }
        None => {
            warn!("DATABASE_URL not set; starting with fixture ports");
            None
        }
    };

    let config = ServerConfig::new(key, cli.cookie_secure, SameSite::Lax, cli.bind_addr)
        .with_db_pool(db_pool)
        .with_agent_url(cli.agent_url);

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    info!(addr = %cli.bind_addr, "careside backend listening");
    server.await
}
