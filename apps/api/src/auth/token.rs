//! HS256 access tokens. `sub` carries the user id, `exp` comes from the
//! configured TTL; validation requires both.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
}

pub fn create_access_token(
    user_id: Uuid,
    secret: &str,
    ttl_minutes: i64,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id,
        exp: (Utc::now() + Duration::minutes(ttl_minutes)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign access token: {e}")))
}

/// Returns the user id for a valid, unexpired token; `None` otherwise.
pub fn verify_access_token(token: &str, secret: &str) -> Option<Uuid> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.sub)
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, SECRET, 30).unwrap();
        assert_eq!(verify_access_token(&token, SECRET), Some(user_id));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_access_token(Uuid::new_v4(), SECRET, 30).unwrap();
        assert_eq!(verify_access_token(&token, "other-secret"), None);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = create_access_token(Uuid::new_v4(), SECRET, -5).unwrap();
        assert_eq!(verify_access_token(&token, SECRET), None);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert_eq!(verify_access_token("not.a.token", SECRET), None);
    }
}
