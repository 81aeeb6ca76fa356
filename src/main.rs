use bike_portal::server::{
    config::Config, error::AppError, scheduler::overdue_sweep, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let policy = config.lending_policy();

    let db = startup::connect_to_database(&config).await?;
    let state = AppState::new(db, policy);

    tracing::info!(
        "Starting lending engine (loan period {} days, limit {} bicycle(s))",
        config.loan_period_days,
        config.max_active_borrowings
    );

    let mut scheduler = overdue_sweep::start_scheduler(state.clone(), &config.overdue_sweep_cron).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down");
    scheduler.shutdown().await?;

    Ok(())
}
