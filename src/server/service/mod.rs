//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the lending engine, which sits between the
//! callers (request handlers, the scheduler) and the data (repository) layer. Services are
//! responsible for:
//!
//! - **Business Logic**: Eligibility rules and lifecycle state machines
//! - **Validation**: Rejecting malformed input before any state is touched
//! - **Transaction Management**: Running each multi-step operation in one transaction
//! - **Mutual Exclusion**: Holding per-record locks while a record is read and updated

pub mod allocation;
pub mod catalogue;
pub mod eligibility;
pub mod lifecycle;
pub mod lock;
pub mod moderation;
pub mod query;
pub mod user;
