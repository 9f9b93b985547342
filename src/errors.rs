use thiserror::Error;

use crate::config::ConfigError;

/// Error kinds surfaced by a generation run
///
/// Every variant is terminal: nothing is retried by the core, and a failed
/// run leaves no partial artifacts on disk.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Generation service rejected the credential: {0}")]
    Auth(String),

    #[error("Generation service error: HTTP {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("Write error: {0}")]
    Write(String),
}

/// Result type for generation operations
pub type GenResult<T> = Result<T, GenError>;

impl GenError {
    /// Short kind label used in user-facing failure summaries
    pub fn kind(&self) -> &'static str {
        match self {
            GenError::Config(ConfigError::MissingCredential(_)) => "MissingCredential",
            GenError::Config(_) => "ConfigError",
            GenError::Network(_) => "NetworkError",
            GenError::Auth(_) => "AuthError",
            GenError::Api { .. } => "ApiError",
            GenError::MalformedResponse(_) => "MalformedResponseError",
            GenError::Write(_) => "WriteError",
        }
    }
}
