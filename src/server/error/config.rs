use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Check the documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {name}: {reason}")]
    InvalidEnvVar {
        name: String,
        value: String,
        reason: String,
    },
}
