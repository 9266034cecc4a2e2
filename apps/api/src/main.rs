mod config;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::matching::dictionary::dictionary;
use crate::matching::KeywordMatcher;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::seed::load_seed;
use crate::store::InMemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
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

    info!("Starting Resume Matcher v{}", env!("CARGO_PKG_VERSION"));

    // Build the skills dictionary once, before the first request
    info!("Skills dictionary loaded ({} terms)", dictionary().term_count());

    // Initialize the document store, optionally from a seed file
    let store = match &config.seed_file {
        Some(path) => InMemoryStore::from(load_seed(path)?),
        None => InMemoryStore::new(),
    };
    let (resumes, job_descriptions) = store.counts().await;
    info!("Store initialized ({resumes} resumes, {job_descriptions} job descriptions)");

    let settings = config.engine_settings();
    info!(
        "Matcher settings: threshold {} / max {} suggestions / reference date {}",
        settings.suggestion_threshold, settings.max_suggestions, settings.reference_date
    );

    // Build app state
    let state = AppState {
        store: Arc::new(store),
        matcher: Arc::new(KeywordMatcher::new(settings)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
