//! Bike Portal Test Utils
//!
//! Provides shared testing utilities for the lending engine. This crate offers a builder
//! for creating test contexts backed by in-memory SQLite databases, plus factories that
//! insert users, bicycles, certificates and borrowings with sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Entity factories for seeding test data
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn borrows_a_bicycle() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_lending_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let student = factory::user::create_eligible_student(db).await?;
//!     let bicycle = factory::bicycle::create_bicycle(db).await?;
//!     // Exercise services...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
