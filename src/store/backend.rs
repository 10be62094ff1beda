//! # Record Store Backend Trait
//!
//! Raw persistence for plant records. Backends do no validation; the
//! gateway hands them only validated records and parsed identifiers.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::record::{PlantDetails, PlantRecord, RecordId};

use super::errors::StoreResult;

/// Backend trait for record persistence
pub trait RecordStore: Send + Sync + 'static {
    /// Short backend name for logs and health output
    fn name(&self) -> &'static str;

    /// Check that the store is reachable
    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;

    /// Persist a new record and return it as stored
    fn insert(&self, record: PlantRecord) -> impl Future<Output = StoreResult<PlantRecord>> + Send;

    /// Every record, in insertion order
    fn find_all(&self) -> impl Future<Output = StoreResult<Vec<PlantRecord>>> + Send;

    /// Look up a record by identifier
    fn find_by_id(
        &self,
        id: RecordId,
    ) -> impl Future<Output = StoreResult<Option<PlantRecord>>> + Send;

    /// Replace the mutable fields of one record and set `updated_at`,
    /// atomically. Returns the post-update record, or `None` if absent.
    fn update_mutable(
        &self,
        id: RecordId,
        details: PlantDetails,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = StoreResult<Option<PlantRecord>>> + Send;

    /// Remove one record. Returns the removed record, or `None` if absent.
    fn delete(&self, id: RecordId) -> impl Future<Output = StoreResult<Option<PlantRecord>>> + Send;
}
