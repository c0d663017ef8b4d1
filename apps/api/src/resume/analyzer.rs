//! CV analysis pipeline: extract text, run the heuristics, embed.
//!
//! This is the layer that promotes "extraction produced nothing" into a
//! user-visible failure. An analysis either yields a complete
//! `ResumeAnalysis` or fails as a whole; there is no partial result.

use bytes::Bytes;

use crate::embedding::{Embedding, EmbeddingGenerator};
use crate::errors::AppError;
use crate::resume::{extract, profiler, skills};

/// Only the first 2000 characters feed the embedding, keeping the
/// fingerprint focused on the summary and most recent work.
pub const MAX_EMBED_CHARS: usize = 2000;

/// The bio is seeded from the first 500 characters of extracted text.
pub const BIO_CHARS: usize = 500;

/// Everything derived from one uploaded document. Built fresh on every
/// analysis call.
#[derive(Debug, Clone)]
pub struct ResumeAnalysis {
    pub full_name: Option<String>,
    pub bio: String,
    pub skills: Vec<String>,
    pub experience_years: i32,
    pub embedding: Embedding,
    pub source_filename: String,
}

pub async fn analyze_resume(
    bytes: Bytes,
    filename: String,
    embedder: &EmbeddingGenerator,
) -> Result<ResumeAnalysis, AppError> {
    let text = tokio::task::spawn_blocking(move || extract::extract_text(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?;

    if text.is_empty() {
        return Err(AppError::UnreadableDocument);
    }

    let full_name = profiler::extract_name(&text);
    let experience_years = profiler::estimate_experience_years(&text);
    let skills = skills::extract_skills(&text);

    let summary: String = text.chars().take(MAX_EMBED_CHARS).collect();
    let embedding = embedder.embed(&summary).await?;

    let bio = text.chars().take(BIO_CHARS).collect();

    Ok(ResumeAnalysis {
        full_name,
        bio,
        skills,
        experience_years,
        embedding,
        source_filename: filename,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::embedding::test_support::StubEmbedder;

    #[tokio::test]
    async fn test_unreadable_document_fails_whole_analysis() {
        let embedder = EmbeddingGenerator::new(Arc::new(StubEmbedder));
        let result =
            analyze_resume(Bytes::from_static(b"junk"), "cv.pdf".into(), &embedder).await;
        assert!(matches!(result, Err(AppError::UnreadableDocument)));
    }
}
