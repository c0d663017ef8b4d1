use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use pgvector::Vector;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::models::profile::{ProfileResponse, ProfileRow};
use crate::resume::analyzer::analyze_resume;
use crate::resume::merge::{merge_profile, MergedProfile};
use crate::state::AppState;

/// Documents above this ceiling are rejected before any parsing.
pub const MAX_RESUME_BYTES: usize = 2 * 1024 * 1024;

const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// When true, extracted values overwrite the bio and full name even if
    /// the user edited them by hand.
    #[serde(default)]
    pub force_refresh: bool,
}

/// POST /api/v1/profiles
///
/// Uploads a CV, runs the analysis pipeline, and upserts the caller's
/// profile.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let (bytes, filename) = read_pdf_field(&mut multipart).await?;

    if bytes.len() > MAX_RESUME_BYTES {
        return Err(AppError::DocumentTooLarge(bytes.len()));
    }

    let analysis = analyze_resume(bytes, filename, &state.embedder).await?;

    let existing = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?;

    let merged = merge_profile(existing.as_ref(), &analysis, params.force_refresh);
    // The account username stands in when extraction found no name.
    let full_name = merged
        .full_name
        .clone()
        .unwrap_or_else(|| user.username.clone());

    let (status, profile) = match existing {
        Some(_) => {
            let row = update_profile(&state, user.id, &merged, &full_name).await?;
            (StatusCode::OK, row)
        }
        None => {
            let row = insert_profile(&state, user.id, &merged, &full_name).await?;
            (StatusCode::CREATED, row)
        }
    };

    info!(
        user_id = %user.id,
        skills = profile.skills.len(),
        experience_years = profile.experience_years,
        "Profile upserted from CV"
    );

    Ok((status, Json(profile.into())))
}

/// GET /api/v1/profiles/me
pub async fn handle_my_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found. Please upload a CV".into()))?;

    Ok(Json(profile.into()))
}

/// Pulls the `file` part out of the multipart body and checks its declared
/// media type before any byte is parsed.
async fn read_pdf_field(multipart: &mut Multipart) -> Result<(Bytes, String), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        if field.content_type() != Some(PDF_MEDIA_TYPE) {
            return Err(AppError::UnsupportedMediaType);
        }

        let filename = field
            .file_name()
            .unwrap_or("resume.pdf")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        return Ok((bytes, filename));
    }

    Err(AppError::Validation(
        "Multipart field 'file' is required".into(),
    ))
}

async fn update_profile(
    state: &AppState,
    user_id: Uuid,
    merged: &MergedProfile,
    full_name: &str,
) -> Result<ProfileRow, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE profiles
        SET full_name = $1, bio = $2, skills = $3, experience_years = $4,
            resume_filename = $5, embedding = $6, updated_at = now()
        WHERE user_id = $7
        RETURNING *
        "#,
    )
    .bind(full_name)
    .bind(&merged.bio)
    .bind(&merged.skills)
    .bind(merged.experience_years)
    .bind(&merged.resume_filename)
    .bind(Vector::from(&merged.embedding))
    .bind(user_id)
    .fetch_one(&state.db)
    .await?;

    Ok(row)
}

async fn insert_profile(
    state: &AppState,
    user_id: Uuid,
    merged: &MergedProfile,
    full_name: &str,
) -> Result<ProfileRow, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles
            (id, user_id, full_name, bio, skills, experience_years, resume_filename, embedding)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(full_name)
    .bind(&merged.bio)
    .bind(&merged.skills)
    .bind(merged.experience_years)
    .bind(&merged.resume_filename)
    .bind(Vector::from(&merged.embedding))
    .fetch_one(&state.db)
    .await?;

    Ok(row)
}
