//! Authenticated-identity extractor. Add `CurrentUser` to a handler's
//! signature to require a valid Bearer token; any failure along the
//! token-to-user path is a 401.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::auth::token::verify_access_token;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

pub struct CurrentUser(pub UserRow);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let user_id =
            verify_access_token(token, &state.config.jwt_secret).ok_or(AppError::Unauthorized)?;

        let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}
