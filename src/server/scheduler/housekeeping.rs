use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::housekeeping::HousekeepingService};

/// Every day at 03:00 UTC.
const HOUSEKEEPING_SCHEDULE: &str = "0 0 3 * * *";

/// Starts the housekeeping scheduler
///
/// The daily job:
/// - archives approved settlement agreements whose end date has passed
/// - cancels pending reservations whose start date has passed
/// - deletes expired and revoked refresh tokens
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(HOUSEKEEPING_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = run_housekeeping(&db).await {
                tracing::error!("Error running housekeeping: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Housekeeping scheduler started");

    Ok(scheduler)
}

async fn run_housekeeping(db: &DatabaseConnection) -> Result<(), AppError> {
    let report = HousekeepingService::new(db).run(Utc::now()).await?;

    tracing::info!(
        "Housekeeping archived {} agreements, cancelled {} reservations, deleted {} refresh tokens",
        report.agreements_archived,
        report.reservations_cancelled,
        report.tokens_deleted
    );

    Ok(())
}
