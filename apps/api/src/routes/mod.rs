pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::resume::handlers::MAX_RESUME_BYTES;
use crate::state::AppState;
use crate::{applications, auth, jobs, matching, resume, users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Identity
        .route("/api/v1/users", post(users::handlers::handle_register))
        .route("/api/v1/users/me", get(users::handlers::handle_me))
        .route("/api/v1/auth/token", post(auth::handlers::handle_login))
        // CV profiles
        .route(
            "/api/v1/profiles",
            post(resume::handlers::handle_upload_resume),
        )
        .route("/api/v1/profiles/me", get(resume::handlers::handle_my_profile))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handlers::handle_list_jobs).post(jobs::handlers::handle_create_job),
        )
        // Registered before /jobs/:id so "match" is never read as an id.
        .route(
            "/api/v1/jobs/match",
            post(matching::handlers::handle_keyword_match)
                .get(matching::handlers::handle_profile_match),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handlers::handle_get_job)
                .patch(jobs::handlers::handle_update_job)
                .delete(jobs::handlers::handle_delete_job),
        )
        // Applications
        .route(
            "/api/v1/jobs/:id/applications",
            post(applications::handlers::handle_apply)
                .get(applications::handlers::handle_job_applications),
        )
        .route(
            "/api/v1/applications/me",
            get(applications::handlers::handle_my_applications),
        )
        .route(
            "/api/v1/applications/:id",
            patch(applications::handlers::handle_update_status),
        )
        // Leave headroom above the document ceiling for multipart framing;
        // the handler enforces the exact byte limit.
        .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES + 64 * 1024))
        .with_state(state)
}
