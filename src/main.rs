//! Metasearch MCP Server
//!
//! Web search via the Tavily API, image search via SearXNG.
//!
//! # Configuration
//! `TAVILY_API_KEY` env var is required. `SEARXNG_BASE_URL` and
//! `TAVILY_BASE_URL` are optional, as is `~/.config/metasearch-mcp/config.toml`.

use rmcp::{transport::stdio, ServiceExt};

use metasearch_mcp::config::Config;
use metasearch_mcp::{logging, MetasearchServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("metasearch_mcp")?;

    tracing::info!("Starting Metasearch MCP Server");

    let config = Config::load()?;
    tracing::info!(
        tavily = %config.tavily.base_url,
        searxng = %config.searxng.base_url,
        "configuration loaded"
    );

    let server = MetasearchServer::new(&config);
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
