//! Campus bicycle-lending portal backend.

pub mod server;
