use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use strum::Display;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use super::connector::{Connector, MongoConnector};
use super::uri::validate_uri;
use super::MongoConfig;
use crate::common::{ConnectionError, ConnectionResult};

/// Lifecycle of the managed connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// Lazily connecting, single-flight owner of the store connection.
///
/// Create one per process and share it behind an `Arc`. The first
/// [`ensure_connected`](Self::ensure_connected) call validates the URI,
/// connects and pings; later calls reuse the handle. Concurrent callers
/// queue on one async mutex, so only one attempt is ever in flight and
/// the state cannot be raced.
pub struct ConnectionManager<C: Connector = MongoConnector> {
    connector: C,
    config: MongoConfig,
    slot: Mutex<Option<C::Handle>>,
    state: AtomicU8,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, config: MongoConfig) -> Self {
        Self {
            connector,
            config,
            slot: Mutex::new(None),
            state: AtomicU8::new(ConnectionState::Disconnected as u8),
        }
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Return the live handle, connecting first if needed.
    ///
    /// Errors are classified into [`ConnectionError`] and leave the
    /// manager disconnected; the next call starts a fresh attempt.
    #[instrument(skip(self))]
    pub async fn ensure_connected(&self) -> ConnectionResult<C::Handle> {
        let mut slot = self.slot.lock().await;

        if let Some(handle) = slot.as_ref() {
            debug!("Using existing database connection");
            return Ok(handle.clone());
        }

        let attempt = Attempt::begin(&self.state);

        match self.connect().await {
            Ok(handle) => {
                *slot = Some(handle.clone());
                attempt.succeed();
                info!("Database connected successfully");
                Ok(handle)
            }
            Err(err) => {
                error!(error = %err, "MongoDB connection error");
                Err(err)
            }
        }
    }

    /// [`ensure_connected`](Self::ensure_connected) bounded by `limit`.
    ///
    /// On timeout the attempt is dropped, releasing the guard and leaving
    /// the manager disconnected.
    pub async fn ensure_connected_within(&self, limit: Duration) -> ConnectionResult<C::Handle> {
        tokio::time::timeout(limit, self.ensure_connected())
            .await
            .map_err(|_| ConnectionError::Timeout {
                operation: "Database connection",
                after: limit,
            })?
    }

    /// Take the handle out for shutdown, leaving the manager disconnected
    pub async fn disconnect(&self) -> Option<C::Handle> {
        let mut slot = self.slot.lock().await;
        self.state
            .store(ConnectionState::Disconnected as u8, Ordering::Release);
        slot.take()
    }

    async fn connect(&self) -> ConnectionResult<C::Handle> {
        debug!("Validating connection string");
        let uri = validate_uri(self.config.uri(), self.config.database())?;

        info!("Creating new database connection");
        let handle = self.connector.connect(&uri, &self.config).await?;
        self.connector.ping(&handle).await?;

        Ok(handle)
    }
}

/// Marks the manager `Connecting` while alive; reverts to `Disconnected`
/// on drop unless [`succeed`](Attempt::succeed) was called.
struct Attempt<'a> {
    state: &'a AtomicU8,
    done: bool,
}

impl<'a> Attempt<'a> {
    fn begin(state: &'a AtomicU8) -> Self {
        state.store(ConnectionState::Connecting as u8, Ordering::Release);
        Self { state, done: false }
    }

    fn succeed(mut self) {
        self.state
            .store(ConnectionState::Connected as u8, Ordering::Release);
        self.done = true;
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.state
                .store(ConnectionState::Disconnected as u8, Ordering::Release);
        }
    }
}
