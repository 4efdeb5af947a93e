//! Profile store: applicant id → latest validated profile.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>` chosen at startup:
//! `PgProfileStore` when `DATABASE_URL` is set, otherwise `InMemoryProfileStore`.
//! The ranking engine never touches the store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::profile::Profile;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProfileStore;
pub use postgres::PgProfileStore;

/// Telegram user id of the applicant.
pub type ApplicantId = i64;

/// A validated profile together with who sent it and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub telegram_id: ApplicantId,
    pub username: String,
    pub profile: Profile,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Stores `record`, replacing any earlier profile for the same applicant.
    async fn put(&self, record: ApplicantRecord) -> Result<(), StoreError>;

    async fn get(&self, telegram_id: ApplicantId) -> Result<Option<ApplicantRecord>, StoreError>;

    /// Releases backend resources. Called once after the server stops.
    async fn close(&self) {}

    /// Backend name for startup logs.
    fn backend(&self) -> &'static str;
}
