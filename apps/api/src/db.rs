use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL PRIMARY KEY,
        email         TEXT NOT NULL UNIQUE,
        name          TEXT,
        password_hash TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS resumes (
        id               BIGSERIAL PRIMARY KEY,
        filename         TEXT NOT NULL,
        storage_key      TEXT NOT NULL,
        extracted_text   TEXT NOT NULL DEFAULT '',
        extracted_skills JSONB NOT NULL,
        created_at       TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

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

/// Creates the `users` and `resumes` tables if they do not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to apply schema")?;
    }
    info!("Database schema ready");
    Ok(())
}
