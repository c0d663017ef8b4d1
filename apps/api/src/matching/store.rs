//! Vector-search collaborator: nearest-neighbor job lookup via pgvector.
//!
//! Postgres computes the distances and returns candidates pre-sorted by
//! ascending distance, truncated to the limit. Index tuning is out of scope;
//! these queries rely on the distance operators alone.

use pgvector::Vector;
use sqlx::{FromRow, PgPool};

use crate::embedding::Embedding;
use crate::errors::AppError;
use crate::matching::ranker::DistanceMetric;
use crate::models::job::{JobRow, JOB_COLUMNS};

/// A job row annotated with its distance from the query vector.
#[derive(Debug, FromRow)]
pub struct JobHit {
    #[sqlx(flatten)]
    pub job: JobRow,
    pub distance: f64,
}

pub async fn nearest_jobs(
    pool: &PgPool,
    query: &Embedding,
    metric: DistanceMetric,
    limit: i64,
) -> Result<Vec<JobHit>, AppError> {
    // The operator comes from the metric enum, never from user input.
    let sql = format!(
        "SELECT {JOB_COLUMNS}, embedding {op} $1 AS distance
         FROM jobs
         ORDER BY distance
         LIMIT $2",
        op = metric.operator()
    );

    let hits = sqlx::query_as::<_, JobHit>(&sql)
        .bind(Vector::from(query))
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(hits)
}
