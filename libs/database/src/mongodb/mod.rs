//! MongoDB connector, connection manager and helpers

mod config;
mod connector;
mod health;
mod manager;
mod uri;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_DATABASE, DEFAULT_MAX_POOL_SIZE, DEFAULT_MIN_POOL_SIZE,
    DEFAULT_SERVER_SELECTION_TIMEOUT, MongoConfig,
};
pub use connector::{Connector, MongoConnector, MongoHandle};
pub use health::{HealthStatus, check_health};
pub use manager::{ConnectionManager, ConnectionState};
pub use uri::{SCHEMES, has_valid_scheme, mask_credentials, validate_uri};

// Re-export MongoDB types for convenience
pub use ::mongodb::{Collection, Database};
