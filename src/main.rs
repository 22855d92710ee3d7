//! PDF reader MCP server entry point.
//!
//! This binary starts the MCP server using STDIO transport.

use pdf_reader_mcp_server::PdfReaderServer;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_reader_mcp_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting PDF reader MCP server v{}", env!("CARGO_PKG_VERSION"));

    let server = PdfReaderServer::new();
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    tracing::info!("PDF reader MCP server stopped");
    Ok(())
}
