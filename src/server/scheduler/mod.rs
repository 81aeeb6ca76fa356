//! Cron jobs for time-driven lifecycle transitions.

pub mod overdue_sweep;
