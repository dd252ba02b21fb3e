use std::time::Duration;

/// Connection-string validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    #[error("MongoDB URI is not defined")]
    Missing,

    #[error("Invalid MongoDB URI format. Must start with mongodb:// or mongodb+srv://")]
    InvalidScheme,
}

/// Classified failure of a connection attempt or a store operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The configured connection string is missing or malformed
    #[error(transparent)]
    Config(#[from] UriError),

    /// Name resolution or routing to the cluster failed
    #[error("Could not reach MongoDB. Please check your network connection and MongoDB URI. ({0})")]
    HostUnreachable(String),

    /// The server rejected the credentials
    #[error("Authentication failed. Please check your MongoDB username and password.")]
    AuthenticationFailed(String),

    /// An operation lost its race against the timer
    #[error("{operation} timed out after {}ms", after.as_millis())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// Anything the classifier does not recognise, passed through verbatim
    #[error("{0}")]
    Unknown(String),
}

pub type ConnectionResult<T> = Result<T, ConnectionError>;

const HOST_UNREACHABLE_MARKERS: &[&str] = &[
    "ENOTFOUND",
    "failed to lookup address",
    "no such host",
    "name or service not known",
    "nodename nor servname",
];

const AUTHENTICATION_MARKERS: &[&str] = &["bad auth", "authentication failed"];

impl ConnectionError {
    /// Classify a driver error message
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_ascii_lowercase();

        if HOST_UNREACHABLE_MARKERS
            .iter()
            .any(|marker| lowered.contains(&marker.to_ascii_lowercase()))
        {
            ConnectionError::HostUnreachable(message)
        } else if AUTHENTICATION_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            ConnectionError::AuthenticationFailed(message)
        } else {
            ConnectionError::Unknown(message)
        }
    }

    /// Whether the error points the operator at the connection string.
    ///
    /// True for validation failures and for unreachable hosts, whose
    /// remedy is checking the URI.
    pub fn mentions_connection_string(&self) -> bool {
        matches!(
            self,
            ConnectionError::Config(_) | ConnectionError::HostUnreachable(_)
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ConnectionError::Timeout { .. })
    }
}
