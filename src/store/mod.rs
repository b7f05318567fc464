//! Persistence of contact form submissions.
//!
//! Handlers depend on the [`SubmissionStore`] trait; [`PgSubmissionStore`] is
//! the backend used by the running service.

mod postgres;

pub use postgres::PgSubmissionStore;

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::domain::{NewSubmission, PageRequest, Submission, SubmissionPage};

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("Failed to execute a query against the database.")]
    Database(#[from] sqlx::Error),
    #[error("The database did not answer in time.")]
    Timeout,
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;

        if let StoreError::Database(err) = self {
            write!(f, "\nCaused by:\n\t{}", err)?;
        }

        Ok(())
    }
}

/// Append-only storage of submissions with newest-first paginated reads.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persists `new_submission` as an unread record stamped with the current
    /// time and a fresh identifier.
    async fn create(&self, new_submission: &NewSubmission) -> Result<Submission, StoreError>;

    /// Returns the requested page ordered by creation time, newest first,
    /// together with the total number of stored submissions.
    async fn list(&self, page_request: PageRequest) -> Result<SubmissionPage, StoreError>;
}

/// Upper bound for a single store call made while serving a request.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs a store call under [`QUERY_TIMEOUT`].
pub async fn with_query_timeout<T, F>(future: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(QUERY_TIMEOUT, future)
        .await
        .map_err(|_| StoreError::Timeout)?
}
