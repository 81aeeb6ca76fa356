//! Authorization guards consulted by the service layer.

pub mod auth;
