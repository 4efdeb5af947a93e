use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::applicant::ApplicantProfileRow;
use crate::store::{ApplicantId, ApplicantRecord, ProfileStore, StoreError};

/// PostgreSQL-backed store. One row per applicant, overwritten on resubmission.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn put(&self, record: ApplicantRecord) -> Result<(), StoreError> {
        let ApplicantRecord {
            telegram_id,
            username,
            profile,
            received_at,
        } = record;

        sqlx::query(
            r#"
            INSERT INTO applicant_profiles
                (telegram_id, username, interests, score, portfolio_summary,
                 portfolio_strength, desired_cities, undesired_institutions, received_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (telegram_id) DO UPDATE SET
                username = EXCLUDED.username,
                interests = EXCLUDED.interests,
                score = EXCLUDED.score,
                portfolio_summary = EXCLUDED.portfolio_summary,
                portfolio_strength = EXCLUDED.portfolio_strength,
                desired_cities = EXCLUDED.desired_cities,
                undesired_institutions = EXCLUDED.undesired_institutions,
                received_at = EXCLUDED.received_at
            "#,
        )
        .bind(telegram_id)
        .bind(username)
        .bind(profile.interests)
        .bind(profile.score)
        .bind(profile.portfolio_summary)
        .bind(profile.portfolio_strength)
        .bind(profile.desired_cities)
        .bind(profile.undesired_institutions)
        .bind(received_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, telegram_id: ApplicantId) -> Result<Option<ApplicantRecord>, StoreError> {
        let row: Option<ApplicantProfileRow> =
            sqlx::query_as("SELECT * FROM applicant_profiles WHERE telegram_id = $1")
                .bind(telegram_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(ApplicantRecord::from))
    }

    async fn close(&self) {
        info!("Closing PostgreSQL connection pool");
        self.pool.close().await;
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
