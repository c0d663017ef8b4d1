use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Roles stored in `users.role`. Kept as plain text in the database;
/// validated at registration time.
pub const ROLE_SEEKER: &str = "seeker";
pub const ROLE_OWNER: &str = "owner";
pub const ROLE_ADMIN: &str = "admin";

pub const VALID_ROLES: [&str; 3] = [ROLE_SEEKER, ROLE_OWNER, ROLE_ADMIN];

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Recruiters and admins may create and manage job postings.
    pub fn can_post_jobs(&self) -> bool {
        matches!(self.role.as_str(), ROLE_OWNER | ROLE_ADMIN)
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// User representation returned to API clients; never carries the hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
            company_name: row.company_name,
            created_at: row.created_at,
        }
    }
}
