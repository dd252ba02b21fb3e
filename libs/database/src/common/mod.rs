//! Error types shared by the connector, the manager and their callers

pub mod error;

pub use error::{ConnectionError, ConnectionResult, UriError};
