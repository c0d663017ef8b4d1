mod applications;
mod auth;
mod config;
mod db;
mod embedding;
mod errors;
mod jobs;
mod matching;
mod models;
mod resume;
mod routes;
mod state;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::embedding::minilm::MiniLmEmbedder;
use crate::embedding::EmbeddingGenerator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.rust_log.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talenta API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and make sure pgvector + tables exist
    let pool = create_pool(&config.database_url).await?;
    init_schema(&pool).await?;

    // Load the embedding model once; it is shared read-only for the life of
    // the process. Model loading is blocking, so it runs off the runtime.
    let cache_dir = config.embed_cache_dir.clone();
    let model = tokio::task::spawn_blocking(move || MiniLmEmbedder::load(&cache_dir)).await??;
    let embedder = EmbeddingGenerator::new(Arc::new(model));

    // Build app state
    let state = AppState {
        db: pool,
        embedder,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
