use axum_helpers::AppError;
use database::ConnectionError;
use thiserror::Error;

/// Shown to clients for any failure caused by the connection string
pub const CONFIGURATION_MESSAGE: &str = "Please contact support. Configuration issue detected.";
/// Shown to clients in production instead of the underlying error
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Username and secret are required")]
    MissingFields,

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to hash secret: {0}")]
    Hash(String),
}

pub type SubmissionResult<T> = Result<T, SubmissionError>;

impl SubmissionError {
    /// Short machine-readable kind, safe to log and audit
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::MissingFields => "validation",
            SubmissionError::Connection(ConnectionError::Config(_)) => "configuration",
            SubmissionError::Connection(ConnectionError::HostUnreachable(_)) => "host_unreachable",
            SubmissionError::Connection(ConnectionError::AuthenticationFailed(_)) => {
                "authentication_failed"
            }
            SubmissionError::Connection(ConnectionError::Timeout { .. }) => "timeout",
            SubmissionError::Connection(ConnectionError::Unknown(_)) => "unknown",
            SubmissionError::Database(_) => "database",
            SubmissionError::Hash(_) => "hash",
        }
    }

    /// Map to the HTTP error, hiding internals unless `reveal` is set.
    ///
    /// Connection-string problems always get the same support message.
    pub fn into_app_error(self, reveal: bool) -> AppError {
        match self {
            SubmissionError::MissingFields => {
                AppError::Validation(SubmissionError::MissingFields.to_string())
            }
            SubmissionError::Connection(ref err) if err.mentions_connection_string() => {
                tracing::error!(error = %err, "Connection string problem");
                AppError::Configuration(CONFIGURATION_MESSAGE.to_string())
            }
            other if reveal => AppError::InternalServerError(other.to_string()),
            other => {
                tracing::error!(error = %other, "Submission failed");
                AppError::InternalServerError(GENERIC_MESSAGE.to_string())
            }
        }
    }
}

impl From<mongodb::error::Error> for SubmissionError {
    fn from(err: mongodb::error::Error) -> Self {
        match ConnectionError::from(err) {
            ConnectionError::Unknown(message) => SubmissionError::Database(message),
            classified => SubmissionError::Connection(classified),
        }
    }
}
