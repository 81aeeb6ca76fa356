//! SeaORM entity definitions for the bicycle lending tables.
//!
//! Status columns are stored as lowercase strings; the server's model layer
//! parses them into closed enums at the repository boundary.

pub mod prelude;

pub mod bicycle;
pub mod borrowing;
pub mod medical_certificate;
pub mod user;
