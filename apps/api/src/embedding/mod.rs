//! Text-to-vector fingerprinting.
//!
//! The model itself is opaque: anything implementing `Embedder` can sit
//! behind `EmbeddingGenerator`. Production uses the local MiniLM ONNX model
//! (`minilm`); tests substitute a deterministic stub.

pub mod minilm;

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::errors::AppError;

/// Every stored and queried vector has exactly this many elements.
pub const EMBEDDING_DIM: usize = 384;

/// A fixed-length dense vector. Immutable once built; the all-zero vector is
/// the reserved "no usable source text" value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Builds an embedding, rejecting any vector that is not 384 elements.
    pub fn new(values: Vec<f32>) -> Result<Self> {
        anyhow::ensure!(
            values.len() == EMBEDDING_DIM,
            "expected {} dimensions, got {}",
            EMBEDDING_DIM,
            values.len()
        );
        Ok(Self(values))
    }

    /// The reserved empty value: 384 zeros, not an empty vector.
    pub fn zeros() -> Self {
        Self(vec![0.0; EMBEDDING_DIM])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<&Embedding> for pgvector::Vector {
    fn from(embedding: &Embedding) -> Self {
        pgvector::Vector::from(embedding.0.clone())
    }
}

impl TryFrom<pgvector::Vector> for Embedding {
    type Error = anyhow::Error;

    fn try_from(vector: pgvector::Vector) -> Result<Self> {
        Self::new(vector.as_slice().to_vec())
    }
}

/// The opaque model contract: plain text in, raw 384-float vector out.
/// Implementations must be safe to call concurrently with no coordination.
pub trait Embedder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>>;
}

/// Thin wrapper around the shared model. Empty input short-circuits to the
/// zero vector without touching the model; everything else is a single
/// blocking-pool model call with the output length validated.
#[derive(Clone)]
pub struct EmbeddingGenerator {
    model: Arc<dyn Embedder>,
}

impl EmbeddingGenerator {
    pub fn new(model: Arc<dyn Embedder>) -> Self {
        Self { model }
    }

    pub async fn embed(&self, text: &str) -> Result<Embedding, AppError> {
        if text.is_empty() {
            return Ok(Embedding::zeros());
        }

        let model = Arc::clone(&self.model);
        let text = text.to_owned();
        let values = tokio::task::spawn_blocking(move || model.encode(&text))
            .await
            .map_err(|e| AppError::Embedding(format!("embedding task failed: {e}")))?
            .map_err(|e| AppError::Embedding(e.to_string()))?;

        Embedding::new(values).map_err(|e| AppError::Embedding(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Deterministic stand-in for the real model: fills the vector with a
    /// constant derived from the input length.
    pub struct StubEmbedder;

    impl Embedder for StubEmbedder {
        fn encode(&self, text: &str) -> Result<Vec<f32>> {
            let fill = text.len() as f32;
            Ok(vec![fill; EMBEDDING_DIM])
        }
    }

    /// Misbehaving model that returns the wrong dimensionality.
    pub struct ShortEmbedder;

    impl Embedder for ShortEmbedder {
        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0; 3])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{ShortEmbedder, StubEmbedder};
    use super::*;

    #[test]
    fn test_zeros_has_full_length() {
        let zeros = Embedding::zeros();
        assert_eq!(zeros.as_slice().len(), EMBEDDING_DIM);
        assert!(zeros.is_zero());
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(Embedding::new(vec![0.5; 10]).is_err());
        assert!(Embedding::new(vec![0.5; EMBEDDING_DIM]).is_ok());
    }

    #[test]
    fn test_nonzero_vector_is_not_zero() {
        let mut values = vec![0.0; EMBEDDING_DIM];
        values[42] = 0.001;
        assert!(!Embedding::new(values).unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_empty_text_skips_the_model() {
        let generator = EmbeddingGenerator::new(Arc::new(ShortEmbedder));
        // ShortEmbedder would fail length validation if it were invoked.
        let embedding = generator.embed("").await.unwrap();
        assert_eq!(embedding, Embedding::zeros());
    }

    #[tokio::test]
    async fn test_embed_returns_fixed_length() {
        let generator = EmbeddingGenerator::new(Arc::new(StubEmbedder));
        let embedding = generator.embed("Python and Docker").await.unwrap();
        assert_eq!(embedding.as_slice().len(), EMBEDDING_DIM);
        assert!(!embedding.is_zero());
    }

    #[tokio::test]
    async fn test_wrong_model_output_is_an_error() {
        let generator = EmbeddingGenerator::new(Arc::new(ShortEmbedder));
        let result = generator.embed("anything").await;
        assert!(matches!(result, Err(AppError::Embedding(_))));
    }
}
