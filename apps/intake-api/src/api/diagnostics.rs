//! Configuration diagnostics
//!
//! Reports whether the connection string looks usable without ever
//! returning its credentials.

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use database::mongodb::{ConnectionState, SCHEMES, mask_credentials, validate_uri};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

const NOT_SET: &str = "Not set";

#[derive(Debug, Serialize, ToSchema)]
pub struct DebugEnv {
    pub mongodb_uri_set: bool,
    /// Connection string with the user-info part replaced by `****`
    pub mongodb_uri_masked: String,
    /// Leading or trailing whitespace present
    pub uri_has_spaces: bool,
    /// Passes connection-string validation
    pub uri_format_valid: bool,
    /// Raw value starts with an accepted scheme
    pub uri_starts_correctly: bool,
    /// Raw `APP_ENV`, or "not set"
    pub environment: String,
    #[schema(value_type = String, example = "disconnected")]
    pub connection_state: ConnectionState,
    pub timestamp: DateTime<Utc>,
}

impl DebugEnv {
    fn inspect(uri: Option<&str>, default_database: &str) -> Self {
        let raw = uri.filter(|u| !u.is_empty());

        Self {
            mongodb_uri_set: raw.is_some(),
            mongodb_uri_masked: raw.map_or_else(|| NOT_SET.to_string(), mask_credentials),
            uri_has_spaces: raw.is_some_and(|u| u != u.trim()),
            uri_format_valid: validate_uri(raw, default_database).is_ok(),
            uri_starts_correctly: raw
                .is_some_and(|u| SCHEMES.iter().any(|scheme| u.starts_with(scheme))),
            environment: "not set".to_string(),
            connection_state: ConnectionState::Disconnected,
            timestamp: Utc::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/debug-env", get(debug_env))
        .with_state(state)
}

/// Sanitized connection-string diagnostics
#[utoipa::path(
    get,
    path = "/api/debug-env",
    tag = "Operations",
    responses(
        (status = 200, description = "Configuration report", body = DebugEnv)
    )
)]
pub async fn debug_env(State(state): State<AppState>) -> Json<DebugEnv> {
    let config = state.connections.config();

    Json(DebugEnv {
        environment: state
            .config
            .environment_name
            .clone()
            .unwrap_or_else(|| "not set".to_string()),
        connection_state: state.connections.state(),
        ..DebugEnv::inspect(config.uri(), config.database())
    })
}
