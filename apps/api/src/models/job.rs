use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting. The embedding column is written at create/update time and
/// queried through `matching::store`; list/detail selects leave it out.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: i32,
    pub description: String,
    pub is_remote: bool,
    pub skills: Vec<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Columns selected by every job query that skips the embedding.
pub const JOB_COLUMNS: &str =
    "id, title, company, location, salary, description, is_remote, skills, owner_id, created_at";
