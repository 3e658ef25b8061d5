//! Tracing setup
//!
//! Logs go to stderr: stdout carries the MCP protocol. Filtering is
//! environment-driven via RUST_LOG with an `info` default for this crate.
//! Set `LOG_FORMAT=json` for structured JSON output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
pub fn init(crate_name: &str) -> anyhow::Result<()> {
    let directive = format!("{}=info", crate_name);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}
