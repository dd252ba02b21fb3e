use std::time::Instant;

use super::connector::Connector;
use super::manager::ConnectionManager;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database is reachable
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Check connectivity through the connection manager.
///
/// Connects on first use (no explicit timeout; the driver's own
/// selection timeout applies) and reports how long it took.
///
/// # Example
/// ```ignore
/// let status = check_health(&manager).await;
/// if !status.healthy {
///     warn!("MongoDB unhealthy: {:?}", status.message);
/// }
/// ```
pub async fn check_health<C: Connector>(manager: &ConnectionManager<C>) -> HealthStatus {
    let start = Instant::now();
    let result = manager.ensure_connected().await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}
