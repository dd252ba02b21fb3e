//! MongoDB implementation of SubmissionRepository

use async_trait::async_trait;
use database::mongodb::ConnectionManager;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::SubmissionResult;
use crate::models::Submission;
use crate::repository::SubmissionRepository;

pub const COLLECTION: &str = "submissions";

/// Stores submissions through the shared [`ConnectionManager`].
///
/// Nothing touches the network until the first request; the manager
/// connects lazily and reuses the handle afterwards.
pub struct MongoSubmissionRepository {
    connections: Arc<ConnectionManager>,
    collection: String,
}

impl MongoSubmissionRepository {
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self::with_collection(connections, COLLECTION)
    }

    pub fn with_collection(connections: Arc<ConnectionManager>, collection: &str) -> Self {
        Self {
            connections,
            collection: collection.to_string(),
        }
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    #[instrument(skip(self))]
    async fn connect(&self) -> SubmissionResult<()> {
        self.connections.ensure_connected().await?;
        Ok(())
    }

    #[instrument(skip(self, submission), fields(submission_id = %submission.id))]
    async fn insert(&self, submission: Submission) -> SubmissionResult<()> {
        let handle = self.connections.ensure_connected().await?;

        handle
            .database()
            .collection::<Submission>(&self.collection)
            .insert_one(&submission)
            .await?;

        info!(
            database = handle.database_name(),
            collection = %self.collection,
            "Submission stored"
        );
        Ok(())
    }
}
