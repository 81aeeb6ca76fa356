//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary, where the
//! string status columns are parsed into closed enums. An unrecognised stored value is an
//! `InternalError`, surfaced to callers as a database type error.

pub mod bicycle;
pub mod borrowing;
pub mod certificate;
pub mod eligibility;
pub mod policy;
pub mod user;
