use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Application lifecycle states stored in `applications.status`.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_REJECTED: &str = "rejected";

pub const VALID_STATUSES: [&str; 3] = [STATUS_PENDING, STATUS_ACCEPTED, STATUS_REJECTED];

/// Connects a seeker to a job. `UNIQUE(user_id, job_id)` prevents duplicate
/// applications at the database level.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub cv_filename: Option<String>,
    pub applied_at: DateTime<Utc>,
}
