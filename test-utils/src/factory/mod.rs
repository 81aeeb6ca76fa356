//! Factory methods for creating test data.
//!
//! Factories insert rows directly with sensible defaults so service tests can describe
//! only the state that matters to them. They bypass the lending services entirely, which
//! makes them the right tool for arranging states (an overdue loan, a rejected
//! certificate) that would otherwise take several service calls to reach.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let student = factory::user::create_eligible_student(db).await?;
//! let bicycle = factory::bicycle::create_bicycle(db).await?;
//! let (bicycle, loan) = factory::helpers::create_open_loan(db, student.id).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let suspended = factory::user::UserFactory::new(db)
//!     .account_status("suspended")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users (students and admins)
//! - `bicycle` - Bicycles in any availability state
//! - `medical_certificate` - Certificates in any moderation state
//! - `borrowing` - Raw borrowing rows
//! - `helpers` - Multi-entity setups that keep bicycle and borrowing state consistent

pub mod bicycle;
pub mod borrowing;
pub mod helpers;
pub mod medical_certificate;
pub mod user;

pub use bicycle::create_bicycle;
pub use medical_certificate::create_certificate;
pub use user::{create_admin, create_eligible_student, create_user};
