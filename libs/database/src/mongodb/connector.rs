use async_trait::async_trait;
use mongodb::{
    Client, Database,
    bson::doc,
    error::{Error as MongoError, ErrorKind},
    options::ClientOptions,
};
use tracing::{debug, info};

use super::MongoConfig;
use crate::common::{ConnectionError, ConnectionResult};

/// Establishes and verifies connections for a [`super::ConnectionManager`].
///
/// The MongoDB implementation is [`MongoConnector`]; tests substitute a
/// fake to drive the manager without a server.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// What a successful connection hands out to callers
    type Handle: Clone + Send + Sync + 'static;

    /// Build a client for an already validated URI
    async fn connect(&self, uri: &str, config: &MongoConfig) -> ConnectionResult<Self::Handle>;

    /// Round-trip to the server confirming reachability and credentials
    async fn ping(&self, handle: &Self::Handle) -> ConnectionResult<()>;
}

/// Connected database handle.
///
/// Cloning is cheap (the driver shares one pool). The client itself stays
/// private; callers only see the database.
#[derive(Clone, Debug)]
pub struct MongoHandle {
    client: Client,
    database: Database,
}

impl MongoHandle {
    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Close the pool, waiting for in-use connections to be returned
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

/// Driver-backed [`Connector`]
#[derive(Clone, Copy, Debug, Default)]
pub struct MongoConnector;

#[async_trait]
impl Connector for MongoConnector {
    type Handle = MongoHandle;

    async fn connect(&self, uri: &str, config: &MongoConfig) -> ConnectionResult<MongoHandle> {
        let mut options = ClientOptions::parse(uri).await.map_err(classify_mongo)?;

        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.server_selection_timeout);

        if let Some(ref app_name) = config.app_name {
            options.app_name = Some(app_name.clone());
        }

        let database_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| config.database.clone());

        debug!(database = %database_name, "Building MongoDB client");
        let client = Client::with_options(options).map_err(classify_mongo)?;
        let database = client.database(&database_name);

        Ok(MongoHandle { client, database })
    }

    async fn ping(&self, handle: &MongoHandle) -> ConnectionResult<()> {
        handle
            .client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(classify_mongo)?;

        info!(database = %handle.database_name(), "MongoDB ping succeeded");
        Ok(())
    }
}

/// Map a driver error onto the connection taxonomy
pub(crate) fn classify_mongo(err: MongoError) -> ConnectionError {
    match err.kind.as_ref() {
        ErrorKind::Authentication { message, .. } => {
            ConnectionError::AuthenticationFailed(message.clone())
        }
        ErrorKind::DnsResolve { message, .. } => ConnectionError::HostUnreachable(message.clone()),
        _ => ConnectionError::classify(err.to_string()),
    }
}

impl From<MongoError> for ConnectionError {
    fn from(err: MongoError) -> Self {
        classify_mongo(err)
    }
}
