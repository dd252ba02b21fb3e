use std::fmt;
use std::time::Duration;

use super::uri::mask_credentials;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or};

pub const DEFAULT_DATABASE: &str = "submissions";
pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;
pub const DEFAULT_MIN_POOL_SIZE: u32 = 5;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// MongoDB connection settings
///
/// The URI is kept raw (untrimmed, possibly absent): it is validated on
/// every connection attempt so a bad value surfaces per request instead
/// of preventing startup.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017").with_database("intake");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone)]
pub struct MongoConfig {
    /// Connection string as configured, before validation
    pub uri: Option<String>,

    /// Database used when the URI names none
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// How long the driver may wait for a suitable server
    pub server_selection_timeout: Duration,
}

impl MongoConfig {
    /// Create a config with the given URI and default bounds
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    /// Create a config with no URI configured
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, server_selection: Duration) -> Self {
        self.connect_timeout = connect;
        self.server_selection_timeout = server_selection;
        self
    }

    /// Get the raw URI, if set
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Get the default database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("uri", &self.uri.as_deref().map(mask_credentials))
            .field("database", &self.database)
            .field("app_name", &self.app_name)
            .field("max_pool_size", &self.max_pool_size)
            .field("min_pool_size", &self.min_pool_size)
            .field("connect_timeout", &self.connect_timeout)
            .field("server_selection_timeout", &self.server_selection_timeout)
            .finish()
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: None,
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            server_selection_timeout: DEFAULT_SERVER_SELECTION_TIMEOUT,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `MONGODB_URI` - connection string; validated per connection attempt
/// - `MONGODB_DATABASE` (optional, default: submissions)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (optional, default: 10)
/// - `MONGODB_MIN_POOL_SIZE` (optional, default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_MS` (optional, default: 5000)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_MS` (optional, default: 5000)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_pool_size = env_parse_or("MONGODB_MAX_POOL_SIZE", DEFAULT_MAX_POOL_SIZE)?;
        let min_pool_size = env_parse_or("MONGODB_MIN_POOL_SIZE", DEFAULT_MIN_POOL_SIZE)?;

        if min_pool_size > max_pool_size {
            return Err(ConfigError::ParseError {
                key: "MONGODB_MIN_POOL_SIZE".to_string(),
                details: format!(
                    "minimum pool size {} exceeds maximum {}",
                    min_pool_size, max_pool_size
                ),
            });
        }

        let connect_timeout_ms = env_parse_or(
            "MONGODB_CONNECT_TIMEOUT_MS",
            DEFAULT_CONNECT_TIMEOUT.as_millis() as u64,
        )?;
        let server_selection_timeout_ms = env_parse_or(
            "MONGODB_SERVER_SELECTION_TIMEOUT_MS",
            DEFAULT_SERVER_SELECTION_TIMEOUT.as_millis() as u64,
        )?;

        Ok(Self {
            uri: env_optional("MONGODB_URI"),
            database: env_or_default("MONGODB_DATABASE", DEFAULT_DATABASE),
            app_name: env_optional("MONGODB_APP_NAME"),
            max_pool_size,
            min_pool_size,
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            server_selection_timeout: Duration::from_millis(server_selection_timeout_ms),
        })
    }
}
