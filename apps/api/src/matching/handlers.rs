use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::embedding::Embedding;
use crate::errors::AppError;
use crate::matching::ranker::{rank, CandidateHit, DistanceMetric};
use crate::matching::store::{nearest_jobs, JobHit};
use crate::models::job::JobRow;
use crate::models::profile::ProfileRow;
use crate::state::AppState;

const MAX_MATCH_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct KeywordMatchRequest {
    pub skills: Vec<String>,
    #[serde(default = "default_keyword_limit")]
    pub limit: i64,
}

fn default_keyword_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct ProfileMatchParams {
    #[serde(default = "default_profile_limit")]
    pub limit: i64,
}

fn default_profile_limit() -> i64 {
    5
}

/// A job annotated with its normalized match score and position.
#[derive(Debug, Serialize)]
pub struct MatchedJob {
    #[serde(flatten)]
    pub job: JobRow,
    pub match_score: f64,
    pub rank: usize,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchedJob>,
}

/// POST /api/v1/jobs/match
///
/// Free-form keyword search: the query vector is embedded on the fly and
/// ranked under L2 distance.
pub async fn handle_keyword_match(
    State(state): State<AppState>,
    Json(req): Json<KeywordMatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    validate_limit(req.limit)?;

    let query_text = req.skills.join(" ");
    let embedding = state.embedder.embed(&query_text).await?;

    let matches = match_against_jobs(&state, &embedding, DistanceMetric::L2, req.limit).await?;
    Ok(Json(MatchResponse { matches }))
}

/// GET /api/v1/jobs/match
///
/// Resume match: the caller's stored profile vector is ranked against all
/// job vectors under cosine distance.
pub async fn handle_profile_match(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ProfileMatchParams>,
) -> Result<Json<MatchResponse>, AppError> {
    validate_limit(params.limit)?;

    let profile = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::MissingQueryVector)?;

    let embedding = Embedding::try_from(profile.embedding)
        .map_err(|e| AppError::Embedding(e.to_string()))?;

    let matches =
        match_against_jobs(&state, &embedding, DistanceMetric::Cosine, params.limit).await?;
    Ok(Json(MatchResponse { matches }))
}

/// Shared tail of both match paths: reject empty query vectors, fetch the
/// nearest candidates, normalize, and re-attach the job rows.
async fn match_against_jobs(
    state: &AppState,
    query: &Embedding,
    metric: DistanceMetric,
    limit: i64,
) -> Result<Vec<MatchedJob>, AppError> {
    // An all-zero vector means no usable source text was ever analyzed;
    // ranking over it would produce meaningless distances.
    if query.is_zero() {
        return Err(AppError::MissingQueryVector);
    }

    let hits = nearest_jobs(&state.db, query, metric, limit).await?;

    let candidates = hits
        .iter()
        .map(|hit| CandidateHit {
            id: hit.job.id,
            distance: hit.distance,
        })
        .collect();
    let mut jobs_by_id: HashMap<Uuid, JobRow> =
        hits.into_iter().map(|JobHit { job, .. }| (job.id, job)).collect();

    let matched = rank(metric, candidates, limit as usize)
        .into_iter()
        .filter_map(|result| {
            jobs_by_id.remove(&result.candidate_id).map(|job| MatchedJob {
                job,
                match_score: result.score,
                rank: result.rank,
            })
        })
        .collect();

    Ok(matched)
}

fn validate_limit(limit: i64) -> Result<(), AppError> {
    if !(1..=MAX_MATCH_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_MATCH_LIMIT}"
        )));
    }
    Ok(())
}
