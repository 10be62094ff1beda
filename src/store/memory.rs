//! # In-Memory Backend
//!
//! Insertion-ordered, process-local record store. Used by tests and by
//! `serve --in-memory` for local development.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::record::{PlantDetails, PlantRecord, RecordId};

use super::backend::RecordStore;
use super::errors::StoreResult;

/// In-memory record store
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<PlantRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert(&self, record: PlantRecord) -> StoreResult<PlantRecord> {
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> StoreResult<Vec<PlantRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<PlantRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update_mutable(
        &self,
        id: RecordId,
        details: PlantDetails,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<PlantRecord>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| r.id == id).map(|record| {
            record.apply(details, updated_at);
            record.clone()
        }))
    }

    async fn delete(&self, id: RecordId) -> StoreResult<Option<PlantRecord>> {
        let mut records = self.records.write().await;
        let position = records.iter().position(|r| r.id == id);
        Ok(position.map(|index| records.remove(index)))
    }
}
