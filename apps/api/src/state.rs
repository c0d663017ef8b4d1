use sqlx::PgPool;

use crate::config::Config;
use crate::embedding::EmbeddingGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Wraps the process-wide, read-only embedding model. Safe to call
    /// concurrently; model calls run on the blocking pool.
    pub embedder: EmbeddingGenerator,
    pub config: Config,
}
