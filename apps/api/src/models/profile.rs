use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A user's stored CV profile. At most one row per user (`user_id UNIQUE`);
/// mutated in place by the upsert flow.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: i32,
    pub resume_filename: Option<String>,
    pub embedding: Vector,
    pub updated_at: DateTime<Utc>,
}

/// Profile representation returned to API clients. The raw vector stays
/// server-side.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: i32,
    pub resume_filename: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for ProfileResponse {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            full_name: row.full_name,
            bio: row.bio,
            skills: row.skills,
            experience_years: row.experience_years,
            resume_filename: row.resume_filename,
            updated_at: row.updated_at,
        }
    }
}
