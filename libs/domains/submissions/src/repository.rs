use async_trait::async_trait;

use crate::error::SubmissionResult;
use crate::models::Submission;

/// Repository trait for submission persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Make sure the store is reachable
    async fn connect(&self) -> SubmissionResult<()>;

    /// Persist a new submission
    async fn insert(&self, submission: Submission) -> SubmissionResult<()>;
}
