use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::token::create_access_token;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /api/v1/auth/token
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;

    // Same rejection for unknown email and bad password.
    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        _ => return Err(AppError::Unauthorized),
    };

    let access_token = create_access_token(
        user.id,
        &state.config.jwt_secret,
        state.config.token_ttl_minutes,
    )?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
