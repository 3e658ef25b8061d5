//! SearXNG backend
//!
//! Adapter for a self-hosted SearXNG instance's image category.
//! See: https://docs.searxng.org/dev/search_api.html

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::ImageSearchBackend;
use crate::config::SearxngConfig;
use crate::error::SearchError;
use crate::types::{ImageHit, ImageSearchQuery, ImageSearchResponse};

/// SearXNG adapter, constructed once at startup with its base URL.
pub struct SearxngBackend {
    client: Client,
    base_url: String,
}

impl SearxngBackend {
    pub fn new(config: &SearxngConfig) -> Self {
        let client = Client::builder()
            .user_agent(concat!("metasearch-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

// SearXNG API response types
#[derive(Debug, Deserialize)]
struct SearxngResponse {
    #[serde(default)]
    results: Vec<SearxngHit>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearxngHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    img_src: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    img_width: Option<u32>,
    #[serde(default)]
    img_height: Option<u32>,
}

impl From<SearxngHit> for ImageHit {
    fn from(hit: SearxngHit) -> Self {
        Self {
            title: hit.title,
            url: hit.url,
            img_src: hit.img_src,
            source: hit.source,
            thumbnail: hit.thumbnail,
            width: hit.img_width,
            height: hit.img_height,
        }
    }
}

fn to_response(query: &ImageSearchQuery, payload: SearxngResponse) -> Result<ImageSearchResponse, SearchError> {
    if let Some(message) = payload.error {
        return Err(SearchError::Backend(format!(
            "searxng reported an error: {message}"
        )));
    }

    Ok(ImageSearchResponse {
        query: query.query.clone(),
        results: payload
            .results
            .into_iter()
            .take(query.limit)
            .map(ImageHit::from)
            .collect(),
    })
}

#[async_trait]
impl ImageSearchBackend for SearxngBackend {
    fn name(&self) -> &str {
        "searxng"
    }

    async fn execute(&self, query: &ImageSearchQuery) -> Result<ImageSearchResponse, SearchError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.query.as_str()),
                ("format", "json"),
                ("categories", "images"),
                ("language", "en"),
                ("pageno", "1"),
                ("safesearch", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => SearchError::Backend(format!(
                    "searxng rate limit exceeded ({status}): {body}"
                )),
                _ => SearchError::Backend(format!("searxng returned status {status}: {body}")),
            });
        }

        let payload: SearxngResponse = response.json().await?;
        to_response(query, payload)
    }
}
