use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_APPLICANT_PROFILES: &str = r#"
CREATE TABLE IF NOT EXISTS applicant_profiles (
    telegram_id            BIGINT PRIMARY KEY,
    username               TEXT NOT NULL,
    interests              TEXT[] NOT NULL DEFAULT '{}',
    score                  BIGINT NOT NULL,
    portfolio_summary      TEXT NOT NULL DEFAULT '',
    portfolio_strength     BIGINT NOT NULL,
    desired_cities         TEXT[] NOT NULL DEFAULT '{}',
    undesired_institutions TEXT[] NOT NULL DEFAULT '{}',
    received_at            TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the profile table on first start.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_APPLICANT_PROFILES)
        .execute(pool)
        .await
        .context("failed to create applicant_profiles table")?;
    Ok(())
}
