//! Common types for tool calls and search results
//!
//! Tool arguments arrive as loose JSON objects and are validated into the
//! strict query types here before any backend is invoked. Backend responses
//! are likewise expressed as explicit schemas so the normalizer never has to
//! do ad hoc field lookups.

use rmcp::model::{Content, JsonObject, RawContent, RawResource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of image results when `limit` is not supplied.
pub const DEFAULT_IMAGE_LIMIT: i64 = 5;
/// Inclusive bounds that a supplied `limit` is clamped to.
pub const MIN_IMAGE_LIMIT: i64 = 1;
pub const MAX_IMAGE_LIMIT: i64 = 20;

// ============================================================================
// Tool Parameter Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The search query
    #[schemars(description = "The search query string")]
    pub query: String,
    /// Search depth
    #[schemars(description = "Search depth: 'basic' or 'advanced' (default: basic)")]
    pub search_depth: Option<SearchDepth>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ImageSearchParams {
    /// The search query
    #[schemars(description = "The image search query string")]
    pub query: String,
    /// Maximum number of images to return
    #[schemars(description = "Maximum number of images to return, clamped to 1-20 (default: 5)")]
    pub limit: Option<i64>,
}

/// How deep the web-search backend should go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Basic,
    Advanced,
}

// ============================================================================
// Validated Queries
// ============================================================================

/// A validated web-search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub depth: SearchDepth,
}

impl SearchQuery {
    /// Validate raw tool-call arguments into a strict query.
    ///
    /// Returns `None` when the arguments are not an object, `query` is
    /// missing, not a string, or empty, or `search_depth` is not one of
    /// `basic`/`advanced`. No backend is ever called with such input.
    pub fn from_args(arguments: Option<JsonObject>) -> Option<Self> {
        let params: SearchParams = serde_json::from_value(Value::Object(arguments?)).ok()?;
        let query = params.query.trim().to_string();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            query,
            depth: params.search_depth.unwrap_or_default(),
        })
    }
}

/// A validated image-search request. `limit` is always within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSearchQuery {
    pub query: String,
    pub limit: usize,
}

impl ImageSearchQuery {
    /// Validate raw tool-call arguments into a strict query.
    ///
    /// `limit` must be a JSON integer when present; out-of-range values are
    /// clamped to [1, 20] rather than rejected, and absence defaults to 5.
    pub fn from_args(arguments: Option<JsonObject>) -> Option<Self> {
        let params: ImageSearchParams = serde_json::from_value(Value::Object(arguments?)).ok()?;
        let query = params.query.trim().to_string();
        if query.is_empty() {
            return None;
        }
        let limit = params
            .limit
            .unwrap_or(DEFAULT_IMAGE_LIMIT)
            .clamp(MIN_IMAGE_LIMIT, MAX_IMAGE_LIMIT) as usize;
        Some(Self { query, limit })
    }
}

// ============================================================================
// Backend Result Types
// ============================================================================

/// Response shape produced by the web-search backend.
///
/// Both fields may be empty; that is a valid "no matches" state, not an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSearchResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<TextSearchHit>,
}

/// One ranked result from the web-search backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    // Tavily calls this field "content" on the wire.
    #[serde(default, alias = "content")]
    pub snippet: Option<String>,
}

/// Response shape produced by the image-search backend, already truncated to
/// the requested limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSearchResponse {
    pub query: String,
    pub results: Vec<ImageHit>,
}

/// One image record from the image-search backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageHit {
    pub title: String,
    pub url: String,
    pub img_src: String,
    pub source: String,
    pub thumbnail: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

// ============================================================================
// Content Blocks
// ============================================================================

/// A unit of tool response content: either text or an image reference.
///
/// The dispatcher always returns a non-empty ordered sequence of these;
/// failures are rendered as a single `Text` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Image { url: String, title: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Image {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Render this block as MCP wire content.
    ///
    /// Image blocks carry a URL rather than inline data, so they map to a
    /// resource link instead of base64 image content.
    pub fn into_content(self) -> Content {
        match self {
            Self::Text { text } => Content::text(text),
            Self::Image { url, title } => Content {
                raw: RawContent::ResourceLink(RawResource::new(url, title)),
                annotations: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Option<JsonObject> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[test]
    fn test_search_query_defaults_to_basic_depth() {
        let query = SearchQuery::from_args(args(json!({ "query": "rust" }))).unwrap();
        assert_eq!(query.query, "rust");
        assert_eq!(query.depth, SearchDepth::Basic);
    }

    #[test]
    fn test_search_query_accepts_advanced_depth() {
        let query =
            SearchQuery::from_args(args(json!({ "query": "rust", "search_depth": "advanced" })))
                .unwrap();
        assert_eq!(query.depth, SearchDepth::Advanced);
    }

    #[test]
    fn test_search_query_rejects_missing_query() {
        assert!(SearchQuery::from_args(args(json!({ "search_depth": "basic" }))).is_none());
        assert!(SearchQuery::from_args(None).is_none());
    }

    #[test]
    fn test_search_query_rejects_non_string_query() {
        assert!(SearchQuery::from_args(args(json!({ "query": 42 }))).is_none());
        assert!(SearchQuery::from_args(args(json!({ "query": ["rust"] }))).is_none());
    }

    #[test]
    fn test_search_query_rejects_empty_query() {
        assert!(SearchQuery::from_args(args(json!({ "query": "" }))).is_none());
        assert!(SearchQuery::from_args(args(json!({ "query": "   " }))).is_none());
    }

    #[test]
    fn test_search_query_rejects_unknown_depth() {
        assert!(
            SearchQuery::from_args(args(json!({ "query": "rust", "search_depth": "deep" })))
                .is_none()
        );
    }

    #[test]
    fn test_image_query_limit_defaults_to_five() {
        let query = ImageSearchQuery::from_args(args(json!({ "query": "cats" }))).unwrap();
        assert_eq!(query.limit, 5);
    }

    #[test]
    fn test_image_query_limit_is_clamped() {
        let over = ImageSearchQuery::from_args(args(json!({ "query": "cats", "limit": 25 })));
        assert_eq!(over.unwrap().limit, 20);

        let under = ImageSearchQuery::from_args(args(json!({ "query": "cats", "limit": 0 })));
        assert_eq!(under.unwrap().limit, 1);

        let negative = ImageSearchQuery::from_args(args(json!({ "query": "cats", "limit": -3 })));
        assert_eq!(negative.unwrap().limit, 1);

        let in_range = ImageSearchQuery::from_args(args(json!({ "query": "cats", "limit": 12 })));
        assert_eq!(in_range.unwrap().limit, 12);
    }

    #[test]
    fn test_image_query_rejects_non_integer_limit() {
        assert!(
            ImageSearchQuery::from_args(args(json!({ "query": "cats", "limit": "many" })))
                .is_none()
        );
        assert!(
            ImageSearchQuery::from_args(args(json!({ "query": "cats", "limit": 2.5 }))).is_none()
        );
    }

    #[test]
    fn test_text_hit_accepts_content_alias_for_snippet() {
        let hit: TextSearchHit =
            serde_json::from_value(json!({ "title": "T", "url": "U", "content": "S" })).unwrap();
        assert_eq!(hit.snippet.as_deref(), Some("S"));
    }
}
