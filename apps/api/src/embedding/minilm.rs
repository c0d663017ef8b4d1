//! Production embedding backend: all-MiniLM-L6-v2 over ONNX via fastembed.
//! Loaded once at process startup and shared read-only for the lifetime of
//! the process.

use std::path::PathBuf;

use anyhow::{Context, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use super::{Embedder, EMBEDDING_DIM};

pub struct MiniLmEmbedder {
    model: TextEmbedding,
}

impl MiniLmEmbedder {
    /// Downloads (first run) or reuses the cached model. Blocking; call
    /// before the server starts accepting requests.
    pub fn load(cache_dir: &str) -> Result<Self> {
        info!("Loading all-MiniLM-L6-v2 embedding model ({EMBEDDING_DIM} dims)...");

        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(PathBuf::from(cache_dir))
                .with_show_download_progress(false),
        )
        .context("failed to initialize the MiniLM embedding model")?;

        info!("Embedding model loaded");
        Ok(Self { model })
    }
}

impl Embedder for MiniLmEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut outputs = self
            .model
            .embed(vec![text], None)
            .context("embedding model invocation failed")?;
        outputs
            .pop()
            .context("embedding model returned no output")
    }
}
