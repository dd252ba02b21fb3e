//! In-memory [`Connector`] used by the manager and health tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::MongoConfig;
use super::connector::Connector;
use crate::common::{ConnectionError, ConnectionResult};

#[derive(Clone, Debug, Default)]
pub enum Outcome {
    #[default]
    Ok,
    Fail(String),
}

impl Outcome {
    pub fn fail(message: &str) -> Self {
        Outcome::Fail(message.to_string())
    }

    fn into_result(self) -> ConnectionResult<()> {
        match self {
            Outcome::Ok => Ok(()),
            Outcome::Fail(message) => Err(ConnectionError::classify(message)),
        }
    }
}

#[derive(Default)]
struct Inner {
    connects: AtomicU32,
    completed: AtomicU32,
    pings: AtomicU32,
    connect_outcome: Mutex<Outcome>,
    ping_outcome: Mutex<Outcome>,
    last_uri: Mutex<Option<String>>,
}

/// Hands out the sequence number of the connect call as its handle
#[derive(Clone, Default)]
pub struct FakeConnector {
    inner: Arc<Inner>,
    delay: Duration,
}

impl FakeConnector {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_connect(self, outcome: Outcome) -> Self {
        *self.inner.connect_outcome.lock().unwrap() = outcome;
        self
    }

    pub fn with_ping(self, outcome: Outcome) -> Self {
        self.set_ping(outcome);
        self
    }

    pub fn set_ping(&self, outcome: Outcome) {
        *self.inner.ping_outcome.lock().unwrap() = outcome;
    }

    /// Connect calls started
    pub fn connects(&self) -> u32 {
        self.inner.connects.load(Ordering::SeqCst)
    }

    /// Connect calls that ran to completion
    pub fn completed(&self) -> u32 {
        self.inner.completed.load(Ordering::SeqCst)
    }

    pub fn pings(&self) -> u32 {
        self.inner.pings.load(Ordering::SeqCst)
    }

    pub fn last_uri(&self) -> Option<String> {
        self.inner.last_uri.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Handle = u32;

    async fn connect(&self, uri: &str, _config: &MongoConfig) -> ConnectionResult<u32> {
        let id = self.inner.connects.fetch_add(1, Ordering::SeqCst) + 1;
        *self.inner.last_uri.lock().unwrap() = Some(uri.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.completed.fetch_add(1, Ordering::SeqCst);

        let outcome = self.inner.connect_outcome.lock().unwrap().clone();
        outcome.into_result().map(|_| id)
    }

    async fn ping(&self, _handle: &u32) -> ConnectionResult<()> {
        self.inner.pings.fetch_add(1, Ordering::SeqCst);
        let outcome = self.inner.ping_outcome.lock().unwrap().clone();
        outcome.into_result()
    }
}
