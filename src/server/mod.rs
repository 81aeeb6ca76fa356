//! Borrowing lifecycle and eligibility engine.
//!
//! This module contains the backend of the campus bicycle-lending portal: who may borrow,
//! which request wins a contested bicycle, how borrowings move through their lifecycle,
//! and how certificate decisions feed back into eligibility. It uses SeaORM for
//! persistence and tokio-cron-scheduler for the periodic overdue sweep.
//!
//! # Architecture
//!
//! The engine follows a layered architecture with clear separation of concerns:
//!
//! - **Service Layer** (`service/`) - Eligibility, allocation, lifecycle, moderation, catalogue and queries
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models, closed status enums and parameter types
//! - **Error Layer** (`error/`) - Per-operation error enums with stable reason codes
//! - **Middleware** (`middleware/`) - Authorization guard answering "is this caller an admin"
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based configuration and lending policy
//! - **State** (`state`) - Shared application state (database pool, lock registry, policy)
//! - **Startup** (`startup`) - Logging initialisation, database connection and migrations
//! - **Scheduler** (`scheduler/`) - Cron job running the overdue sweep
//!
//! # Write Path
//!
//! A state-changing operation flows through these steps:
//!
//! 1. **Service** validates input and, where needed, asks the guard for admin rights
//! 2. **Service** acquires the per-record locks it needs (user, then bicycle, then certificate)
//! 3. **Service** opens a transaction and hands it to the repositories
//! 4. **Data** performs conditional updates; zero affected rows means a lost race
//! 5. **Service** commits, or drops the transaction to roll back on any error

pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
