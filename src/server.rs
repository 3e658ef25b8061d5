//! MCP server implementation for metasearch
//!
//! The dispatcher is the single entry point for tool calls: it validates the
//! tool name and arguments, routes to the matching backend adapter under the
//! fixed deadline, normalizes success, and classifies failure. It is total:
//! every outcome, including validation failures, is rendered as a non-empty
//! content sequence, never as a protocol-level fault.

use std::sync::Arc;
use std::time::Duration;

use rmcp::model::{
    AnnotateAble, CallToolRequestParam, CallToolResult, JsonObject, ListResourcesResult,
    ListToolsResult, PaginatedRequestParam, RawResource, Resource, ServerCapabilities, ServerInfo,
    Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use schemars::JsonSchema;

use crate::backends::searxng::SearxngBackend;
use crate::backends::tavily::TavilyBackend;
use crate::backends::{ImageSearchBackend, TextSearchBackend};
use crate::config::Config;
use crate::deadline::{with_deadline, BACKEND_DEADLINE};
use crate::error::{ErrorCategory, SearchError};
use crate::normalize;
use crate::types::{ContentBlock, ImageSearchParams, ImageSearchQuery, SearchParams, SearchQuery};

/// The main Metasearch MCP server.
///
/// Holds one constructed-once adapter per backend; there is no other state
/// shared across tool calls.
#[derive(Clone)]
pub struct MetasearchServer {
    text: Arc<dyn TextSearchBackend>,
    images: Arc<dyn ImageSearchBackend>,
}

impl MetasearchServer {
    pub fn new(config: &Config) -> Self {
        Self::with_backends(
            Arc::new(TavilyBackend::new(&config.tavily)),
            Arc::new(SearxngBackend::new(&config.searxng)),
        )
    }

    /// Build a server over explicit adapter instances.
    pub fn with_backends(
        text: Arc<dyn TextSearchBackend>,
        images: Arc<dyn ImageSearchBackend>,
    ) -> Self {
        Self { text, images }
    }

    /// Resolve and execute one tool call.
    ///
    /// Always returns a non-empty block sequence; failures become a single
    /// text block. Unknown tools and invalid arguments are rejected before
    /// any backend call.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> Vec<ContentBlock> {
        self.dispatch_with_deadline(name, arguments, BACKEND_DEADLINE)
            .await
    }

    async fn dispatch_with_deadline(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
        deadline: Duration,
    ) -> Vec<ContentBlock> {
        tracing::info!(tool = name, "tool call received");

        match name {
            "search" => {
                let Some(query) = SearchQuery::from_args(arguments) else {
                    tracing::error!(tool = name, "invalid web search arguments");
                    return invalid_arguments();
                };

                tracing::info!(
                    backend = self.text.name(),
                    query = %query.query,
                    depth = ?query.depth,
                    "executing web search"
                );

                match with_deadline(deadline, self.text.execute(&query)).await {
                    Ok(response) => {
                        tracing::info!(
                            backend = self.text.name(),
                            results = response.results.len(),
                            answered = response.answer.is_some(),
                            "web search succeeded"
                        );
                        normalize::text_results(&response)
                    }
                    Err(failure) => render_failure("web search", &failure),
                }
            }

            "image_search" => {
                let Some(query) = ImageSearchQuery::from_args(arguments) else {
                    tracing::error!(tool = name, "invalid image search arguments");
                    return invalid_arguments();
                };

                tracing::info!(
                    backend = self.images.name(),
                    query = %query.query,
                    limit = query.limit,
                    "executing image search"
                );

                match with_deadline(deadline, self.images.execute(&query)).await {
                    Ok(response) => {
                        tracing::info!(
                            backend = self.images.name(),
                            results = response.results.len(),
                            "image search succeeded"
                        );
                        normalize::image_results(&response)
                    }
                    Err(failure) => render_failure("image search", &failure),
                }
            }

            other => {
                tracing::error!(tool = other, "unknown tool requested");
                vec![ContentBlock::text(
                    ErrorCategory::InvalidTool.user_message(other),
                )]
            }
        }
    }

    /// The static tool catalog.
    pub fn tool_catalog() -> Vec<Tool> {
        vec![
            Tool::new(
                "search",
                "Search the web using the Tavily API. Returns an AI-generated answer \
                 plus ranked results with titles, URLs, and summaries.",
                schema_object::<SearchParams>(),
            ),
            Tool::new(
                "image_search",
                "Search for images using a SearXNG instance. Returns a summary of the \
                 matches plus a link per image.",
                schema_object::<ImageSearchParams>(),
            ),
        ]
    }

    /// The static, purely descriptive resource catalog: one illustrative
    /// entry per tool.
    pub fn resource_catalog() -> Vec<Resource> {
        let mut web = RawResource::new(
            "websearch://query=`who is the current Prime Minister of Japan`,search_depth=`basic`",
            "Example web search",
        );
        web.description = Some(
            "General web search using the Tavily API. search_depth is 'basic' or \
             'advanced'; 'advanced' searches deeper."
                .to_string(),
        );
        web.mime_type = Some("application/json".to_string());

        let mut images = RawResource::new(
            "imagesearch://query=`tokyo tower at night`,limit=`5`",
            "Example image search",
        );
        images.description = Some(
            "Image search using a SearXNG instance. limit is clamped to 1-20 and \
             defaults to 5."
                .to_string(),
        );
        images.mime_type = Some("application/json".to_string());

        vec![web.no_annotation(), images.no_annotation()]
    }
}

fn invalid_arguments() -> Vec<ContentBlock> {
    vec![ContentBlock::text(
        ErrorCategory::InvalidArguments.user_message(""),
    )]
}

fn render_failure(operation: &str, failure: &SearchError) -> Vec<ContentBlock> {
    let category = ErrorCategory::classify(failure);
    tracing::error!(%failure, ?category, "{} failed", operation);
    vec![ContentBlock::text(
        category.user_message(&failure.to_string()),
    )]
}

fn schema_object<T: JsonSchema>() -> Arc<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(serde_json::Value::Object(schema)) => Arc::new(schema),
        // Root schemas for the parameter structs are always objects.
        _ => Arc::new(JsonObject::default()),
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

// Implemented by hand rather than with the tool-router macros: the dispatch
// contract renders unknown tools and invalid arguments as successful
// single-text-block results, which the macro router would instead reject as
// protocol errors.
impl ServerHandler for MetasearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Metasearch MCP Server - web search via the Tavily API (AI-generated \
                 answers plus ranked results) and image search via a self-hosted \
                 SearXNG instance. Failures are reported as text content."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: Self::tool_catalog(),
            next_cursor: None,
            meta: Default::default(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let blocks = self.dispatch(request.name.as_ref(), request.arguments).await;
        Ok(CallToolResult::success(
            blocks.into_iter().map(ContentBlock::into_content).collect(),
        ))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: Self::resource_catalog(),
            next_cursor: None,
            meta: Default::default(),
        })
    }
}
