//! Application state management.

use database::mongodb::ConnectionManager;
use std::sync::Arc;

use crate::config::Config;

/// Shared application state.
///
/// Cloned for each router (Arc clones only). The connection manager is
/// the single owner of the MongoDB connection for the whole process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub connections: Arc<ConnectionManager>,
}

impl AppState {
    /// Include internal error detail in responses
    pub fn reveal_errors(&self) -> bool {
        !self.config.environment.is_production()
    }
}
