use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::auth::password::hash_password;
use crate::errors::AppError;
use crate::models::user::{UserResponse, UserRow, ROLE_OWNER, ROLE_SEEKER, VALID_ROLES};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub company_name: Option<String>,
}

fn default_role() -> String {
    ROLE_SEEKER.to_string()
}

/// POST /api/v1/users
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters long".into(),
        ));
    }
    if !VALID_ROLES.contains(&req.role.as_str()) {
        return Err(AppError::Validation(format!(
            "Role must be one of: {}",
            VALID_ROLES.join(", ")
        )));
    }

    let username_taken: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(&req.username)
            .fetch_optional(&state.db)
            .await?;
    if username_taken.is_some() {
        return Err(AppError::Validation("Username already exists".into()));
    }

    let email_taken: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(&req.email)
            .fetch_optional(&state.db)
            .await?;
    if email_taken.is_some() {
        return Err(AppError::Validation("Email already registered".into()));
    }

    // Only recruiters carry a company name.
    let company_name = if req.role == ROLE_OWNER {
        req.company_name
    } else {
        None
    };

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, username, email, password_hash, role, company_name)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.username)
    .bind(req.email.to_lowercase())
    .bind(hash_password(&req.password)?)
    .bind(&req.role)
    .bind(&company_name)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users/me
pub async fn handle_me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
