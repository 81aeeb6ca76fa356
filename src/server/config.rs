use chrono::Duration;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::policy::{LendingPolicy, DEFAULT_LOAN_PERIOD_DAYS, DEFAULT_MAX_ACTIVE_BORROWINGS},
};

/// Every five minutes, on the minute.
const DEFAULT_OVERDUE_SWEEP_CRON: &str = "0 */5 * * * *";

pub struct Config {
    pub database_url: String,

    pub loan_period_days: i64,
    pub max_active_borrowings: u64,

    /// Six-field cron expression (seconds first) for the overdue sweep.
    pub overdue_sweep_cron: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let loan_period_days = parse_positive(&lookup, "LOAN_PERIOD_DAYS", DEFAULT_LOAN_PERIOD_DAYS)?;
        let max_active_borrowings = parse_positive(
            &lookup,
            "MAX_ACTIVE_BORROWINGS",
            DEFAULT_MAX_ACTIVE_BORROWINGS as i64,
        )? as u64;

        let overdue_sweep_cron = lookup("OVERDUE_SWEEP_CRON")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OVERDUE_SWEEP_CRON.to_string());

        Ok(Self {
            database_url,
            loan_period_days,
            max_active_borrowings,
            overdue_sweep_cron,
        })
    }

    pub fn lending_policy(&self) -> LendingPolicy {
        LendingPolicy {
            loan_period: Duration::days(self.loan_period_days),
            max_active_borrowings: self.max_active_borrowings,
        }
    }
}

fn parse_positive<F>(lookup: &F, name: &str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };

    match value.trim().parse::<i64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        Ok(_) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
            reason: "must be greater than zero".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
            reason: e.to_string(),
        }),
    }
}
