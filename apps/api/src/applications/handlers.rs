use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::jobs::handlers::fetch_job;
use crate::models::application::{ApplicationRow, STATUS_PENDING, VALID_STATUSES};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplicationCreate {
    pub cv_filename: Option<String>,
}

/// POST /api/v1/jobs/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<Uuid>,
    Json(req): Json<ApplicationCreate>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let job = fetch_job(&state, job_id).await?;

    if job.owner_id == user.id {
        return Err(AppError::Validation(
            "You cannot apply to your own job".into(),
        ));
    }

    let already_applied: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM applications WHERE user_id = $1 AND job_id = $2")
            .bind(user.id)
            .bind(job_id)
            .fetch_optional(&state.db)
            .await?;
    if already_applied.is_some() {
        return Err(AppError::Validation(
            "You have already applied to this job".into(),
        ));
    }

    let application = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications (id, user_id, job_id, status, cv_filename)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(job_id)
    .bind(STATUS_PENDING)
    .bind(&req.cv_filename)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications/me
pub async fn handle_my_applications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let applications = sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE user_id = $1 ORDER BY applied_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(applications))
}

/// GET /api/v1/jobs/:id/applications
///
/// Restricted to the job's owner.
pub async fn handle_job_applications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let job = fetch_job(&state, job_id).await?;
    if job.owner_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    let applications = sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE job_id = $1 ORDER BY applied_at DESC",
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(applications))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PATCH /api/v1/applications/:id
///
/// The job owner moves an application through its lifecycle.
pub async fn handle_update_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<ApplicationRow>, AppError> {
    if !VALID_STATUSES.contains(&req.status.as_str()) {
        return Err(AppError::Validation(format!(
            "Status must be one of: {}",
            VALID_STATUSES.join(", ")
        )));
    }

    let application =
        sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    let job = fetch_job(&state, application.job_id).await?;
    if job.owner_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    let updated = sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $1 WHERE id = $2 RETURNING *",
    )
    .bind(&req.status)
    .bind(id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}
