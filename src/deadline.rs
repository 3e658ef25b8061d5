//! Deadline enforcement for backend calls
//!
//! Every backend invocation is bounded by a fixed wall-clock deadline. On
//! expiry the caller stops waiting; any in-flight work on the backend side is
//! abandoned, not cancelled.

use std::future::Future;
use std::time::Duration;

use crate::error::SearchError;

/// Fixed deadline applied to every backend call. A policy constant, not
/// derived from input.
pub const BACKEND_DEADLINE: Duration = Duration::from_secs(30);

/// Run `operation` to completion or until `deadline` expires, whichever
/// comes first. Expiry is converted into [`SearchError::Timeout`].
pub async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, SearchError>
where
    F: Future<Output = Result<T, SearchError>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => {
            tracing::error!(
                deadline_secs = deadline.as_secs(),
                "backend call exceeded its deadline"
            );
            Err(SearchError::Timeout(deadline.as_secs()))
        }
    }
}
