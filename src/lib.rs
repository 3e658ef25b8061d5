//! Metasearch MCP Library
//!
//! MCP server exposing two search tools over heterogeneous backends:
//! `search` (AI-augmented web search via the Tavily API) and `image_search`
//! (image search via a self-hosted SearXNG instance). Backend results are
//! normalized into a uniform content-block sequence; every failure is
//! classified and rendered as text content, so tool calls never fail at the
//! protocol level.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use metasearch_mcp::{config::Config, MetasearchServer};
//!
//! let config = Config::load()?;
//! let server = MetasearchServer::new(&config);
//! let blocks = server.dispatch("search", arguments).await;
//! ```
//!
//! # Configuration
//! `TAVILY_API_KEY` is required; `SEARXNG_BASE_URL` defaults to
//! `http://localhost:8080`. See [`config::Config`].

pub mod backends;
pub mod config;
pub mod deadline;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::MetasearchServer;

// Re-export the types tool callers interact with
pub use error::{ErrorCategory, SearchError};
pub use types::{ContentBlock, ImageSearchParams, SearchDepth, SearchParams};
