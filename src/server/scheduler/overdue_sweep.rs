use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::lifecycle::LifecycleService, state::AppState};

/// Starts the overdue sweep scheduler.
///
/// Each tick marks active borrowings past their due time as overdue. The sweep is a
/// single conditional update, so overlapping or missed ticks are harmless; failures are
/// logged and the next tick retries.
///
/// # Arguments
/// - `state`: Application state providing the database and lock registry
/// - `cron`: Six-field cron expression for the sweep
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it alive and shut it down on exit
/// - `Err(AppError::SchedulerErr)` - Invalid cron expression or scheduler failure
pub async fn start_scheduler(state: AppState, cron: &str) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_state = state.clone();
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let state = job_state.clone();

        Box::pin(async move {
            if let Err(e) = run_sweep(&state).await {
                tracing::error!("Error sweeping overdue borrowings: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Overdue sweep scheduler started ({})", cron);

    Ok(scheduler)
}

/// Runs one sweep at the current time.
pub async fn run_sweep(state: &AppState) -> Result<u64, AppError> {
    let count = LifecycleService::new(&state.db, &state.locks)
        .sweep_overdue(Utc::now())
        .await?;

    Ok(count)
}
