use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Enables pgvector and creates the schema if it does not exist yet.
/// Ids are generated app-side (`Uuid::new_v4()`), so no uuid-ossp extension.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    let statements = [
        "CREATE EXTENSION IF NOT EXISTS vector",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'seeker',
            company_name TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            full_name TEXT,
            bio TEXT,
            skills TEXT[] NOT NULL DEFAULT '{}',
            experience_years INTEGER NOT NULL DEFAULT 0,
            resume_filename TEXT,
            embedding VECTOR(384) NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id UUID PRIMARY KEY,
            title TEXT NOT NULL,
            company TEXT NOT NULL,
            location TEXT NOT NULL,
            salary INTEGER NOT NULL,
            description TEXT NOT NULL,
            is_remote BOOLEAN NOT NULL DEFAULT FALSE,
            skills TEXT[] NOT NULL DEFAULT '{}',
            embedding VECTOR(384) NOT NULL,
            owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS applications (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            job_id UUID NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
            status TEXT NOT NULL DEFAULT 'pending',
            cv_filename TEXT,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (user_id, job_id)
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("failed to run schema statement: {statement}"))?;
    }

    info!("Database schema ready");
    Ok(())
}
