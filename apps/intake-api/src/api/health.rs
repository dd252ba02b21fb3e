//! Database health endpoint

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use database::mongodb::check_health;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Result of a connectivity check against MongoDB
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealth {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "connected" when healthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Classified connection error when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub response_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(database_health))
        .with_state(state)
}

/// Check MongoDB connectivity
///
/// Connects on first use, then reuses the shared connection.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Operations",
    responses(
        (status = 200, description = "Database reachable", body = DatabaseHealth),
        (status = 500, description = "Database unreachable or misconfigured", body = DatabaseHealth)
    )
)]
pub async fn database_health(State(state): State<AppState>) -> Response {
    let health = check_health(&state.connections).await;

    if health.healthy {
        let body = DatabaseHealth {
            status: "healthy".to_string(),
            database: Some("connected".to_string()),
            error: None,
            response_time_ms: health.response_time_ms,
            timestamp: Utc::now(),
        };
        (StatusCode::OK, Json(body)).into_response()
    } else {
        tracing::warn!(error = ?health.message, "Database health check failed");
        let body = DatabaseHealth {
            status: "unhealthy".to_string(),
            database: None,
            error: health.message,
            response_time_ms: health.response_time_ms,
            timestamp: Utc::now(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{get_json, state_with};
    use database::mongodb::MongoConfig;
    use std::time::Duration;

    #[tokio::test]
    async fn test_missing_uri_is_unhealthy() {
        let state = state_with(MongoConfig::unset());

        let (status, body) = get_json::<DatabaseHealth>(router(state), "/health").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "unhealthy");
        assert_eq!(body.error.as_deref(), Some("MongoDB URI is not defined"));
        assert!(body.database.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unhealthy() {
        let config = MongoConfig::new("mongodb://127.0.0.1:1/?directConnection=true")
            .with_timeouts(Duration::from_millis(200), Duration::from_millis(200));
        let state = state_with(config);

        let (status, body) = get_json::<DatabaseHealth>(router(state.clone()), "/health").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "unhealthy");
        assert!(!state.connections.is_connected());
    }
}
