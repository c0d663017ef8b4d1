use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::jobs::job_context_text;
use crate::models::job::{JobRow, JOB_COLUMNS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobListParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub search: Option<String>,
    pub location: Option<String>,
    pub is_remote: Option<bool>,
    pub min_salary: Option<i32>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobRow>,
    pub meta: PageMeta,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListParams>,
) -> Result<Json<JobListResponse>, AppError> {
    if params.page < 1 {
        return Err(AppError::Validation("page must be at least 1".into()));
    }
    if !(1..=100).contains(&params.limit) {
        return Err(AppError::Validation("limit must be between 1 and 100".into()));
    }

    let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM jobs");
    push_filters(&mut count_query, &params);
    let total_items: i64 = count_query
        .build_query_scalar()
        .fetch_one(&state.db)
        .await?;

    let mut list_query = QueryBuilder::new(format!("SELECT {JOB_COLUMNS} FROM jobs"));
    push_filters(&mut list_query, &params);
    list_query.push(" ORDER BY created_at DESC LIMIT ");
    list_query.push_bind(params.limit);
    list_query.push(" OFFSET ");
    list_query.push_bind((params.page - 1) * params.limit);

    let jobs: Vec<JobRow> = list_query.build_query_as().fetch_all(&state.db).await?;

    let total_pages = (total_items + params.limit - 1) / params.limit;

    Ok(Json(JobListResponse {
        jobs,
        meta: PageMeta {
            page: params.page,
            limit: params.limit,
            total_items,
            total_pages,
        },
    }))
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, params: &JobListParams) {
    query.push(" WHERE TRUE");

    if let Some(search) = &params.search {
        let pattern = format!("%{search}%");
        query.push(" AND (title ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR description ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
    if let Some(location) = &params.location {
        query.push(" AND location ILIKE ");
        query.push_bind(format!("%{location}%"));
    }
    if let Some(is_remote) = params.is_remote {
        query.push(" AND is_remote = ");
        query.push_bind(is_remote);
    }
    if let Some(min_salary) = params.min_salary {
        query.push(" AND salary >= ");
        query.push_bind(min_salary);
    }
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = fetch_job(&state, id).await?;
    Ok(Json(job))
}

#[derive(Debug, Deserialize)]
pub struct JobCreate {
    pub title: String,
    pub location: String,
    pub salary: i32,
    pub description: String,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// POST /api/v1/jobs
///
/// Recruiters only. The job's embedding is computed here, once, from the
/// title/description/skills context text.
pub async fn handle_create_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<JobCreate>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    if !user.can_post_jobs() {
        return Err(AppError::Forbidden);
    }
    let company = user.company_name.clone().ok_or_else(|| {
        AppError::Validation(
            "You must set a company name on your account before posting jobs".into(),
        )
    })?;

    let context = job_context_text(&req.title, &req.description, &req.skills);
    let embedding = state.embedder.embed(&context).await?;

    let job = sqlx::query_as::<_, JobRow>(&format!(
        r#"
        INSERT INTO jobs
            (id, title, company, location, salary, description, is_remote, skills, embedding, owner_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {JOB_COLUMNS}
        "#,
    ))
    .bind(Uuid::new_v4())
    .bind(&req.title)
    .bind(&company)
    .bind(&req.location)
    .bind(req.salary)
    .bind(&req.description)
    .bind(req.is_remote)
    .bind(&req.skills)
    .bind(Vector::from(&embedding))
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

#[derive(Debug, Deserialize)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub location: Option<String>,
    pub salary: Option<i32>,
    pub description: Option<String>,
    pub is_remote: Option<bool>,
    pub skills: Option<Vec<String>>,
}

/// PATCH /api/v1/jobs/:id
///
/// When the title, description, or skills change, the embedding is
/// recomputed from the new values so match quality tracks the posting.
pub async fn handle_update_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<JobUpdate>,
) -> Result<Json<JobRow>, AppError> {
    let job = fetch_job(&state, id).await?;
    if job.owner_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    let text_changed = req.title.is_some() || req.description.is_some() || req.skills.is_some();

    let title = req.title.unwrap_or(job.title);
    let location = req.location.unwrap_or(job.location);
    let salary = req.salary.unwrap_or(job.salary);
    let description = req.description.unwrap_or(job.description);
    let is_remote = req.is_remote.unwrap_or(job.is_remote);
    let skills = req.skills.unwrap_or(job.skills);

    let updated = if text_changed {
        let context = job_context_text(&title, &description, &skills);
        let embedding = state.embedder.embed(&context).await?;

        sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE jobs
            SET title = $1, location = $2, salary = $3, description = $4,
                is_remote = $5, skills = $6, embedding = $7
            WHERE id = $8
            RETURNING {JOB_COLUMNS}
            "#,
        ))
        .bind(&title)
        .bind(&location)
        .bind(salary)
        .bind(&description)
        .bind(is_remote)
        .bind(&skills)
        .bind(Vector::from(&embedding))
        .bind(id)
        .fetch_one(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE jobs
            SET title = $1, location = $2, salary = $3, description = $4,
                is_remote = $5, skills = $6
            WHERE id = $7
            RETURNING {JOB_COLUMNS}
            "#,
        ))
        .bind(&title)
        .bind(&location)
        .bind(salary)
        .bind(&description)
        .bind(is_remote)
        .bind(&skills)
        .bind(id)
        .fetch_one(&state.db)
        .await?
    };

    Ok(Json(updated))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let job = fetch_job(&state, id).await?;
    if job.owner_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn fetch_job(state: &AppState, id: Uuid) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}
