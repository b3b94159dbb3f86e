//! Postern - aggregating HTTP gateway for a tag-indexed blog post catalog
//!
//! "The small gate beside the great one"

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postern::{
    cache::ResponseCache,
    catalog::{CatalogClient, PostService, PostSource},
    config::Args,
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("postern={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Print startup banner
    info!("======================================");
    info!("  Postern - Blog Post Catalog Gateway");
    info!("  \"The small gate beside the great one\"");
    info!("======================================");
    info!("Node ID: {}", args.node_id);
    info!("Listen: {}", args.listen);
    info!("Upstream catalog: {}", args.upstream_url);
    info!("Request timeout: {}ms", args.request_timeout_ms);
    info!(
        "Cache flush: every {}s{}",
        args.cache_flush_interval_secs,
        if args.cache_flush_align_midnight {
            ", aligned to UTC midnight"
        } else {
            ""
        }
    );
    info!("======================================");

    // Build the upstream catalog client
    let client = CatalogClient::new(
        &args.upstream_url,
        Duration::from_millis(args.request_timeout_ms),
    )?;

    // Wire the pipeline: client -> merge/sort service -> response cache
    let cache = Arc::new(ResponseCache::new());
    let service = Arc::new(PostService::new(
        Arc::new(client) as Arc<dyn PostSource>,
        Arc::clone(&cache),
    ));

    let state = Arc::new(server::AppState::new(args, service, cache));

    // Run the server
    if let Err(e) = server::run(state).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
