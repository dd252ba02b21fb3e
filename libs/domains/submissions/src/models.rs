use axum_helpers::ClientMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Stored submission record (collection `submissions`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub username: String,
    /// Argon2 PHC string, never the secret itself
    pub secret_hash: String,
    /// Assigned by the server when the record is built
    pub created_at: DateTime<Utc>,
    pub client_agent: Option<String>,
    pub client_address: Option<String>,
}

impl Submission {
    pub fn new(username: String, secret_hash: String, client: ClientMetadata) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            secret_hash,
            created_at: Utc::now(),
            client_agent: client.user_agent,
            client_address: client.address,
        }
    }
}

/// Submit request body, JSON or URL-encoded
#[derive(Clone, Default, Deserialize, ToSchema)]
pub struct SubmitForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    #[schema(format = Password)]
    pub secret: Option<String>,
}

impl SubmitForm {
    /// Both fields, if both are present and non-empty
    pub fn fields(self) -> Option<(String, String)> {
        match (self.username, self.secret) {
            (Some(username), Some(secret)) if !username.is_empty() && !secret.is_empty() => {
                Some((username, secret))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for SubmitForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitForm")
            .field("username", &self.username)
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}
