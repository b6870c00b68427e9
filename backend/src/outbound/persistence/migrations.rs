//! Embedded migration runner.
//!
//! Migrations are plain SQL under `migrations/` and run synchronously on a
//! dedicated blocking thread at startup, before the async pool is built.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

pub(crate) const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not connect to the database.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to run migrations: {message}")]
    Apply { message: String },
    /// The blocking task running migrations was cancelled.
    #[error("migration task failed: {message}")]
    Task { message: String },
}

/// Apply all pending migrations against the given database URL.
///
/// Returns the number of migrations applied by this call.
pub async fn run_pending_migrations(database_url: String) -> Result<usize, MigrationError> {
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn =
            PgConnection::establish(&database_url).map_err(|err| MigrationError::Connection {
                message: err.to_string(),
            })?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| MigrationError::Apply {
                message: err.to_string(),
            })
    })
    .await
    .map_err(|err| MigrationError::Task {
        message: err.to_string(),
    })??;

    if applied > 0 {
        info!(applied, "database migrations applied");
    }
    Ok(applied)
}
