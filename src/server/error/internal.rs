use sea_orm::DbErr;
use thiserror::Error;

/// Internal issues with stored data indicating bugs or manual tampering.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InternalError {
    /// A status column holds a value outside its closed set.
    #[error("Unrecognised {kind} '{value}' in storage")]
    UnknownStatus {
        /// Which column was being parsed
        kind: &'static str,
        /// The stored value
        value: String,
    },
}

impl InternalError {
    pub fn unknown_status(kind: &'static str, value: &str) -> Self {
        Self::UnknownStatus {
            kind,
            value: value.to_string(),
        }
    }
}

/// Repositories report unparseable rows as type conversion failures.
impl From<InternalError> for DbErr {
    fn from(err: InternalError) -> Self {
        DbErr::Type(err.to_string())
    }
}
