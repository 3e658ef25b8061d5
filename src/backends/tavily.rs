//! Tavily backend
//!
//! Adapter for the Tavily AI search API: one POST per search, AI answer
//! generation enabled, images excluded. See https://docs.tavily.com

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use super::TextSearchBackend;
use crate::config::TavilyConfig;
use crate::error::SearchError;
use crate::types::{SearchDepth, SearchQuery, TextSearchResponse};

/// Fixed number of ranked results requested per search.
const MAX_RESULTS: u32 = 3;

/// Tavily adapter, constructed once at startup with its credential.
pub struct TavilyBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TavilyBackend {
    pub fn new(config: &TavilyConfig) -> Self {
        let client = Client::builder()
            .user_agent(concat!("metasearch-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: SearchDepth,
    include_answer: bool,
    include_images: bool,
    max_results: u32,
    topic: &'a str,
}

#[async_trait]
impl TextSearchBackend for TavilyBackend {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn execute(&self, query: &SearchQuery) -> Result<TextSearchResponse, SearchError> {
        let request = TavilyRequest {
            query: &query.query,
            search_depth: query.depth,
            include_answer: true,
            include_images: false,
            max_results: MAX_RESULTS,
            topic: "general",
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Pre-shape well-known statuses so classification does not
            // depend on the backend's error prose.
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SearchError::Backend(
                    format!("tavily rejected the api_key ({status}): {body}"),
                ),
                StatusCode::TOO_MANY_REQUESTS => SearchError::Backend(format!(
                    "tavily rate limit exceeded ({status}): {body}"
                )),
                _ => SearchError::Backend(format!("tavily returned status {status}: {body}")),
            });
        }

        let payload: TextSearchResponse = response.json().await?;
        Ok(payload)
    }
}
