//! Submission Service - Business logic layer

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use axum_helpers::ClientMetadata;
use database::ConnectionError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::{SubmissionError, SubmissionResult};
use crate::models::{Submission, SubmitForm};
use crate::repository::SubmissionRepository;

/// Upper bounds for the two slow steps of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTimeouts {
    pub connect: Duration,
    pub save: Duration,
}

impl Default for SubmissionTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(8),
            save: Duration::from_secs(4),
        }
    }
}

pub struct SubmissionService<R: SubmissionRepository> {
    repository: Arc<R>,
    timeouts: SubmissionTimeouts,
}

impl<R: SubmissionRepository> SubmissionService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_timeouts(repository, SubmissionTimeouts::default())
    }

    pub fn with_timeouts(repository: R, timeouts: SubmissionTimeouts) -> Self {
        Self {
            repository: Arc::new(repository),
            timeouts,
        }
    }

    pub fn timeouts(&self) -> SubmissionTimeouts {
        self.timeouts
    }

    /// Validate, connect, hash and store one submission.
    ///
    /// Presence is checked before any I/O. A timed out step is dropped,
    /// which cancels the underlying connection attempt or write.
    #[instrument(skip(self, form, client))]
    pub async fn submit(
        &self,
        form: SubmitForm,
        client: ClientMetadata,
    ) -> SubmissionResult<Submission> {
        let (username, secret) = form.fields().ok_or(SubmissionError::MissingFields)?;

        race(
            "Database connection",
            self.timeouts.connect,
            self.repository.connect(),
        )
        .await?;

        let secret_hash = hash_secret(secret).await?;
        let submission = Submission::new(username, secret_hash, client);

        race(
            "Save operation",
            self.timeouts.save,
            self.repository.insert(submission.clone()),
        )
        .await?;

        tracing::info!(submission_id = %submission.id, "Submission accepted");
        Ok(submission)
    }
}

async fn race<T>(
    operation: &'static str,
    after: Duration,
    step: impl Future<Output = SubmissionResult<T>>,
) -> SubmissionResult<T> {
    tokio::time::timeout(after, step).await.map_err(|_| {
        tracing::warn!(operation, after_ms = after.as_millis() as u64, "Timed out");
        SubmissionError::Connection(ConnectionError::Timeout { operation, after })
    })?
}

/// Salted argon2id PHC string. Runs on the blocking pool.
async fn hash_secret(secret: String) -> SubmissionResult<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| SubmissionError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| SubmissionError::Hash(e.to_string()))?
}
