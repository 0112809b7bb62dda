mod career;
mod config;
mod errors;
mod glucose;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::career::catalog::{JobCatalog, JobSource, LiveJobSearch};
use crate::career::embedder::{SeededEmbedder, TextEmbedder};
use crate::career::ingest::CvParser;
use crate::career::memory::MemoryStore;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; invalid values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Companion API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize memory store (creates the JSON document if missing)
    let memory = MemoryStore::open(&config.memory_file)?;
    info!("Memory store at {}", memory.path().display());

    // Initialize job catalog (static fallback when live search is absent or fails)
    let catalog = JobCatalog::new(build_live_search(&config));

    // Initialize CV parser and embedder
    let cv_parser: Arc<dyn CvParser> = Arc::from(config.cv_parser.build());
    let embedder: Arc<dyn TextEmbedder> = Arc::new(SeededEmbedder::new(
        config.embedding_seed,
        config.embedding_dimensions,
    ));
    info!(
        "CV parser: {}, embedder: {} ({} dims, seed {})",
        cv_parser.name(),
        embedder.name(),
        embedder.dimensions(),
        config.embedding_seed
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        cv_parser,
        catalog,
        embedder,
        memory: Arc::new(memory),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once a frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the live job search client when `JOB_SEARCH_URL` is set.
fn build_live_search(config: &Config) -> Option<Arc<dyn JobSource>> {
    let url = config.job_search_url.clone()?;
    let timeout = Duration::from_secs(config.job_search_timeout_secs);
    match LiveJobSearch::new(url.clone(), timeout) {
        Ok(live) => {
            info!("Live job search enabled: {url} (timeout {timeout:?})");
            Some(Arc::new(live))
        }
        Err(e) => {
            warn!("{e}; live job search disabled");
            None
        }
    }
}
