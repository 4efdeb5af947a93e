use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{ApplicantId, ApplicantRecord, ProfileStore, StoreError};

/// Process-local store. Contents are lost on restart.
#[derive(Default, Clone)]
pub struct InMemoryProfileStore {
    records: Arc<RwLock<HashMap<ApplicantId, ApplicantRecord>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn put(&self, record: ApplicantRecord) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        guard.insert(record.telegram_id, record);
        Ok(())
    }

    async fn get(&self, telegram_id: ApplicantId) -> Result<Option<ApplicantRecord>, StoreError> {
        let guard = self.records.read().await;
        Ok(guard.get(&telegram_id).cloned())
    }

    async fn close(&self) {
        self.records.write().await.clear();
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
