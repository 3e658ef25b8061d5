//! Search backend adapters
//!
//! Each backend exposes a single `execute` operation behind a trait so the
//! dispatcher can be exercised against stand-ins. The two traits are
//! separate because the backends take different parameters and produce
//! different result shapes; adding a third backend means one new adapter
//! and one new normalizer branch, not dispatcher changes.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::{ImageSearchQuery, ImageSearchResponse, SearchQuery, TextSearchResponse};

pub mod searxng;
pub mod tavily;

/// AI-augmented web search: query + depth in, answer + ranked results out.
#[async_trait]
pub trait TextSearchBackend: Send + Sync {
    /// Backend name, used in log entries.
    fn name(&self) -> &str;

    /// Execute one search. Fails with a backend-specific [`SearchError`].
    async fn execute(&self, query: &SearchQuery) -> Result<TextSearchResponse, SearchError>;
}

/// Image search: query + limit in, image records out.
#[async_trait]
pub trait ImageSearchBackend: Send + Sync {
    /// Backend name, used in log entries.
    fn name(&self) -> &str;

    /// Execute one search, truncating records to the query's limit.
    async fn execute(&self, query: &ImageSearchQuery) -> Result<ImageSearchResponse, SearchError>;
}
