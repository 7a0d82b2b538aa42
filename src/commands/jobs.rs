//! Jobs command - Background job management.
//!
//! - `work`: relay the notification outbox and deliver queued notifications
//! - `list`: show queue counts and outbox backlog
//! - `clear`: remove failed notification jobs

use sea_orm::{DatabaseBackend, Statement};

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::jobs::NotificationJob;

pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_worker(&config).await,
        JobsAction::List => list_jobs(&config).await,
        JobsAction::Clear => clear_failed_jobs(&config).await,
    }
}

/// Start the notification worker together with the outbox relay.
///
/// The relay moves outbox rows into the apalis queue; the worker drains the
/// queue through the configured dispatcher.
async fn run_worker(config: &Config) -> AppResult<()> {
    use std::time::Duration;

    use apalis::prelude::*;
    use apalis_sql::postgres::PostgresStorage;
    use apalis_sql::sqlx::postgres::PgPoolOptions;

    use crate::config::WORKER_NAME_NOTIFICATIONS;
    use crate::infra::{dispatcher_from_config, Database, OutboxStore};
    use crate::jobs::{notification_job_handler, run_relay, NotificationJob};

    tracing::info!("Connecting to database for job worker...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

    let storage: PostgresStorage<NotificationJob> = PostgresStorage::new(pool);

    let db = Database::connect(config).await?;
    let outbox = OutboxStore::new(db.get_connection());

    let dispatcher = dispatcher_from_config(config)
        .map_err(|e| AppError::internal(format!("Failed to build dispatcher: {}", e)))?;

    let worker = WorkerBuilder::new(WORKER_NAME_NOTIFICATIONS)
        .data(dispatcher)
        .backend(storage.clone())
        .build_fn(notification_job_handler);

    let monitor = Monitor::new().register(worker);

    tracing::info!("Job worker started. Press Ctrl+C to stop.");

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                tracing::error!("Worker error: {}", e);
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = run_relay(
            &outbox,
            storage,
            config.outbox_batch_size,
            Duration::from_millis(config.outbox_poll_interval_ms),
        ) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Job worker stopped.");
    Ok(())
}

/// Job type apalis records for notification jobs pushed by the relay.
fn notification_job_type() -> &'static str {
    std::any::type_name::<NotificationJob>()
}

fn job_counts_statement() -> Statement {
    Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "SELECT status::text as status, COUNT(*)::bigint as count FROM apalis.jobs \
         WHERE job_type = $1 GROUP BY status",
        [notification_job_type().into()],
    )
}

fn clear_failed_statement() -> Statement {
    Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "DELETE FROM apalis.jobs WHERE status = 'Failed' AND job_type = $1",
        [notification_job_type().into()],
    )
}

/// List pending and failed notification jobs
///
/// Queries the apalis job tables and displays status counts.
async fn list_jobs(config: &Config) -> AppResult<()> {
    use sea_orm::{ConnectionTrait, Database};

    tracing::info!("Connecting to database...");

    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    // Check if apalis schema exists
    let result = db
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') as exists".to_string(),
        ))
        .await
        .map_err(|e| AppError::internal(format!("Query failed: {}", e)))?;

    let schema_exists = result
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false);

    if !schema_exists {
        println!("\n=== Job Queue Status ===");
        println!("Job queue not initialized.");
        println!("Run 'jobs work' first to create the queue tables.");
        println!("========================\n");
        return Ok(());
    }

    // Query job counts
    let rows = db
        .query_all(job_counts_statement())
        .await
        .map_err(|e| AppError::internal(format!("Query failed: {}", e)))?;

    let mut pending = 0i64;
    let mut running = 0i64;
    let mut failed = 0i64;
    let mut done = 0i64;

    for row in rows {
        if let (Ok(status), Ok(count)) = (
            row.try_get::<String>("", "status"),
            row.try_get::<i64>("", "count"),
        ) {
            match status.as_str() {
                "Pending" => pending = count,
                "Running" => running = count,
                "Failed" => failed = count,
                "Done" => done = count,
                _ => {}
            }
        }
    }

    println!("\n=== Job Queue Status ===");
    println!("Pending:  {}", pending);
    println!("Running:  {}", running);
    println!("Failed:   {}", failed);
    println!("Done:     {}", done);
    match outbox_backlog(&db).await {
        Some(backlog) => println!("Outbox:   {} not yet relayed", backlog),
        None => println!("Outbox:   unknown"),
    }
    println!("========================\n");

    Ok(())
}

/// Un-relayed outbox rows, or `None` when the count cannot be read.
async fn outbox_backlog(db: &sea_orm::DatabaseConnection) -> Option<i64> {
    use sea_orm::ConnectionTrait;

    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT COUNT(*)::bigint as count FROM notification_outbox WHERE relayed_at IS NULL"
                .to_string(),
        ))
        .await;

    match row {
        Ok(Some(row)) => match row.try_get::<i64>("", "count") {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!(error = %e, "Outbox backlog count unreadable");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Outbox backlog query failed");
            None
        }
    }
}

/// Clear failed jobs from the queue
async fn clear_failed_jobs(config: &Config) -> AppResult<()> {
    use sea_orm::{ConnectionTrait, Database};

    tracing::info!("Connecting to database...");

    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    // Check if apalis schema exists
    let result = db
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') as exists".to_string(),
        ))
        .await
        .map_err(|e| AppError::internal(format!("Query failed: {}", e)))?;

    let schema_exists = result
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false);

    if !schema_exists {
        println!("Job queue not initialized. Nothing to clear.");
        return Ok(());
    }

    // Delete failed jobs
    let result = db
        .execute(clear_failed_statement())
        .await
        .map_err(|e| AppError::internal(format!("Failed to clear jobs: {}", e)))?;

    let count = result.rows_affected();
    println!("Cleared {} failed notification job(s).", count);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::Values;

    #[test]
    fn job_type_is_the_storage_namespace() {
        assert!(notification_job_type().ends_with("::NotificationJob"));
    }

    #[test]
    fn listing_and_clearing_only_touch_notification_jobs() {
        let bound = Some(Values(vec![notification_job_type().into()]));

        let counts = job_counts_statement();
        assert!(counts.sql.contains("WHERE job_type = $1"));
        assert_eq!(counts.values, bound);

        let clear = clear_failed_statement();
        assert!(clear.sql.contains("job_type = $1"));
        assert_eq!(clear.values, bound);
    }
}
