mod aggregator;
mod auth;
mod config;
mod documents;
mod errors;
mod models;
mod routes;
mod search;
mod searches;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::aggregator::HttpJobSource;
use crate::config::Config;
use crate::routes::build_router;
use crate::search::match_scorer::HeuristicMatchScorer;
use crate::searches::store::{
    MemorySearchStore, PgSearchStore, SearchStore, MEMORY_STORE_CAPACITY,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Search API v{}", env!("CARGO_PKG_VERSION"));

    let searches: Arc<dyn SearchStore> = match &config.database_url {
        Some(url) => Arc::new(PgSearchStore::connect(url, 10).await?),
        None => {
            warn!(
                "DATABASE_URL not set; keeping the latest {} saved searches in memory only",
                MEMORY_STORE_CAPACITY
            );
            Arc::new(MemorySearchStore::new())
        }
    };

    let job_source = HttpJobSource::new(config.job_api_url.clone(), config.job_api_key.clone())?;
    info!("Job aggregator client initialized ({})", config.job_api_url);

    let state = AppState {
        config: config.clone(),
        searches,
        job_source: Arc::new(job_source),
        match_scorer: Arc::new(HeuristicMatchScorer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the dashboard host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
