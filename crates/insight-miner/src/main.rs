mod config;
mod error;
mod mcp_api;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use insight_core::catalog::Catalog;
use insight_core::composer::{OpenerPicker, RandomOpeners, SeededOpeners};
use insight_core::pipeline::SynthesisPipeline;

use config::Config;
use error::AppError;
use server::InsightMinerServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting insight-miner MCP server");

    let config = Config::from_env()?;
    info!(
        catalog = ?config.catalog_path,
        max_insights = config.max_insights,
        latency_ms = config.latency.as_millis(),
        seeded = config.seed.is_some(),
        "configuration loaded"
    );

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path).map_err(AppError::from)?,
        None => Catalog::builtin(),
    };
    info!(
        topics = catalog.topics().len(),
        default_campaigns = catalog.default_campaigns().len(),
        "catalog loaded"
    );

    let picker: Arc<dyn OpenerPicker> = match config.seed {
        Some(seed) => Arc::new(SeededOpeners::new(seed)),
        None => Arc::new(RandomOpeners),
    };
    let pipeline = SynthesisPipeline::new(Arc::new(catalog))
        .with_picker(picker)
        .with_options(config.pipeline_options());
    let server = InsightMinerServer::new(Arc::new(pipeline));

    if let Ok(addr) = std::env::var("MCP_TCP_LISTEN_ADDR") {
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
