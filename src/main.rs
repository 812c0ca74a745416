use nats_docs_mcp::config::Config;
use nats_docs_mcp::server::DocsServer;
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nats_docs_mcp::tracing::init();

    let config = Config::load()?;
    tracing::info!(
        sources = config.sources.len(),
        "starting nats-docs-mcp MCP server"
    );

    let server = DocsServer::new(config)?;

    // Initial ingestion before serving so the first search has an index.
    match server.state().ingest(false).await {
        Ok(summary) => tracing::info!("{}", summary.trim_end()),
        Err(e) => tracing::error!("initial ingestion failed: {e:#}"),
    }

    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
