use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::matching::profile::Profile;
use crate::store::ApplicantRecord;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantProfileRow {
    pub telegram_id: i64,
    pub username: String,
    pub interests: Vec<String>,
    pub score: i64,
    pub portfolio_summary: String,
    pub portfolio_strength: i64,
    pub desired_cities: Vec<String>,
    pub undesired_institutions: Vec<String>,
    pub received_at: DateTime<Utc>,
}

impl From<ApplicantProfileRow> for ApplicantRecord {
    fn from(row: ApplicantProfileRow) -> Self {
        ApplicantRecord {
            telegram_id: row.telegram_id,
            username: row.username,
            profile: Profile {
                interests: row.interests,
                score: row.score,
                portfolio_summary: row.portfolio_summary,
                portfolio_strength: row.portfolio_strength,
                desired_cities: row.desired_cities,
                undesired_institutions: row.undesired_institutions,
            },
            received_at: row.received_at,
        }
    }
}
