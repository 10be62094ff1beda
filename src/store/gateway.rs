//! # Record Store Gateway
//!
//! The single entry point for record operations. It owns the backend and
//! the connection state, validates before touching the store, and maps
//! store outcomes onto one result type:
//!
//! - `Ok(record)` on success
//! - `Err(GatewayError::NotFound)` for a well-formed id with no record
//! - `Err(GatewayError::Store)` for any backend fault, cause preserved
//! - `Err(GatewayError::Validation)` for client faults, before any store call
//!
//! Every operation is a single attempt. Nothing is retried.

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::observability::{Event, Logger};
use crate::record::{self, PlantRecord, RecordId, ValidationError};

use super::backend::RecordStore;
use super::errors::StoreError;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Payload or identifier rejected (client fault)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Well-formed identifier with no matching record
    #[error("Plant not found: {0}")]
    NotFound(RecordId),

    /// Backend failure (server fault)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_))
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::Validation(_) | GatewayError::NotFound(_)
        )
    }
}

/// Whether the gateway has reached its store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connected => "connected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Millisecond precision, matching what the document store keeps
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Record Store Gateway
#[derive(Debug)]
pub struct RecordGateway<S: RecordStore> {
    store: S,
    state: ConnectionState,
}

impl<S: RecordStore> RecordGateway<S> {
    /// Create a gateway. It refuses every operation until
    /// [`connect`](Self::connect) succeeds.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: ConnectionState::Disconnected,
        }
    }

    /// Ping the store once and mark the gateway connected.
    pub async fn connect(&mut self) -> Result<(), StoreError> {
        self.store.ping().await?;
        self.state = ConnectionState::Connected;
        Ok(())
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn ensure_connected(&self) -> Result<(), StoreError> {
        match self.state {
            ConnectionState::Connected => Ok(()),
            ConnectionState::Disconnected => Err(StoreError::Disconnected),
        }
    }

    /// Every record, in the store's natural order
    pub async fn list(&self) -> GatewayResult<Vec<PlantRecord>> {
        self.ensure_connected()?;
        Ok(self.store.find_all().await?)
    }

    /// Fetch one record.
    ///
    /// A malformed id is rejected as `InvalidId` before any lookup.
    pub async fn get(&self, id: &str) -> GatewayResult<PlantRecord> {
        let id = RecordId::parse(id)?;
        self.ensure_connected()?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or(GatewayError::NotFound(id))
    }

    /// Validate and insert a new record.
    ///
    /// The identifier and both timestamps are assigned here; anything the
    /// client sent for them is ignored.
    pub async fn create(&self, payload: &Value) -> GatewayResult<PlantRecord> {
        let draft = record::validate(payload)?;
        self.ensure_connected()?;

        let record = PlantRecord::create(RecordId::generate(), draft, now());
        let stored = self.store.insert(record).await?;

        Logger::info(
            Event::RecordCreated,
            &[
                ("id", &stored.id.to_hex()),
                ("plant_name", &stored.details.plant_name),
            ],
        );
        Ok(stored)
    }

    /// Replace every mutable field of an existing record.
    ///
    /// The identifier is checked first, then the full payload. Owner fields
    /// in the payload must be present but their values are ignored. Never
    /// creates a record.
    pub async fn update(&self, id: &str, payload: &Value) -> GatewayResult<PlantRecord> {
        let id = RecordId::parse(id)?;
        let draft = record::validate(payload)?;
        self.ensure_connected()?;

        let updated = self
            .store
            .update_mutable(id, draft.details, now())
            .await?
            .ok_or(GatewayError::NotFound(id))?;

        Logger::info(Event::RecordUpdated, &[("id", &updated.id.to_hex())]);
        Ok(updated)
    }

    /// Remove a record and return its last state.
    pub async fn delete(&self, id: &str) -> GatewayResult<PlantRecord> {
        let id = RecordId::parse(id)?;
        self.ensure_connected()?;

        let removed = self
            .store
            .delete(id)
            .await?
            .ok_or(GatewayError::NotFound(id))?;

        Logger::info(Event::RecordDeleted, &[("id", &removed.id.to_hex())]);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{HealthStatus, PlantDetails};
    use crate::store::errors::StoreResult;
    use crate::store::InMemoryRecordStore;
    use serde_json::json;
    use std::error::Error as _;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn payload() -> Value {
        json!({
            "image": "https://example.com/jade.jpg",
            "plantName": "Jade",
            "category": "succulent",
            "description": "Money tree",
            "careLevel": "easy",
            "wateringFrequency": "every 3 weeks",
            "lastWateredDate": "2024-05-01",
            "nextWateringDate": "2024-05-22",
            "healthStatus": "healthy",
            "userEmail": "ana@example.com",
            "userName": "Ana"
        })
    }

    async fn connected() -> RecordGateway<InMemoryRecordStore> {
        let mut gateway = RecordGateway::new(InMemoryRecordStore::new());
        gateway.connect().await.unwrap();
        gateway
    }

    /// Backend whose every data call fails, for fault propagation
    #[derive(Default)]
    struct FailingStore {
        calls: AtomicUsize,
    }

    impl FailingStore {
        fn refuse(&self, operation: &'static str) -> StoreError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            StoreError::fault(
                operation,
                io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            )
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RecordStore for FailingStore {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn ping(&self) -> StoreResult<()> {
            Ok(())
        }
        async fn insert(&self, _: PlantRecord) -> StoreResult<PlantRecord> {
            Err(self.refuse("insert"))
        }
        async fn find_all(&self) -> StoreResult<Vec<PlantRecord>> {
            Err(self.refuse("find"))
        }
        async fn find_by_id(&self, _: RecordId) -> StoreResult<Option<PlantRecord>> {
            Err(self.refuse("find_one"))
        }
        async fn update_mutable(
            &self,
            _: RecordId,
            _: PlantDetails,
            _: DateTime<Utc>,
        ) -> StoreResult<Option<PlantRecord>> {
            Err(self.refuse("find_one_and_update"))
        }
        async fn delete(&self, _: RecordId) -> StoreResult<Option<PlantRecord>> {
            Err(self.refuse("find_one_and_delete"))
        }
    }

    async fn failing() -> RecordGateway<FailingStore> {
        let mut gateway = RecordGateway::new(FailingStore::default());
        gateway.connect().await.unwrap();
        gateway
    }

    /// Asserts a refused-connection fault from `operation`
    fn assert_refused<T: std::fmt::Debug>(result: GatewayResult<T>, operation: &str) {
        let err = result.unwrap_err();
        assert!(!err.is_client_error(), "{}", operation);

        let GatewayError::Store(store_err) = err else {
            panic!("expected store error from {}", operation);
        };
        assert_eq!(store_err.operation(), Some(operation));
        let cause = store_err.source().unwrap();
        assert_eq!(
            cause.downcast_ref::<io::Error>().unwrap().kind(),
            io::ErrorKind::ConnectionRefused
        );
    }

    #[tokio::test]
    async fn test_disconnected_gateway_refuses_operations() {
        let gateway = RecordGateway::new(InMemoryRecordStore::new());
        assert_eq!(gateway.state(), ConnectionState::Disconnected);

        assert!(matches!(
            gateway.list().await,
            Err(GatewayError::Store(StoreError::Disconnected))
        ));
        assert!(matches!(
            gateway.create(&payload()).await,
            Err(GatewayError::Store(StoreError::Disconnected))
        ));
        assert!(gateway.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_validation_precedes_connection_check() {
        let gateway = RecordGateway::new(InMemoryRecordStore::new());

        assert!(matches!(
            gateway.get("nope").await,
            Err(GatewayError::Validation(ValidationError::InvalidId(_)))
        ));
        assert!(matches!(
            gateway.create(&json!({})).await,
            Err(GatewayError::Validation(ValidationError::MissingFields(_)))
        ));
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_equal_timestamps() {
        let gateway = connected().await;
        let mut body = payload();
        body["_id"] = json!("65f1c0a2b3d4e5f601234567");
        body["createdAt"] = json!("1999-01-01T00:00:00Z");

        let created = gateway.create(&body).await.unwrap();
        assert_ne!(created.id.to_hex(), "65f1c0a2b3d4e5f601234567");
        assert_eq!(created.created_at, created.updated_at);
        assert!(created.created_at.timestamp() > 946_684_800);
    }

    #[tokio::test]
    async fn test_update_ignores_owner_changes() {
        let gateway = connected().await;
        let created = gateway.create(&payload()).await.unwrap();

        let mut body = payload();
        body["healthStatus"] = json!("dying");
        body["userEmail"] = json!("mallory@example.com");
        body["userName"] = json!("Mallory");

        let updated = gateway
            .update(&created.id.to_hex(), &body)
            .await
            .unwrap();
        assert_eq!(updated.details.health_status, HealthStatus::Dying);
        assert_eq!(updated.user_email, "ana@example.com");
        assert_eq!(updated.user_name, "Ana");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_checks_id_before_payload() {
        let gateway = connected().await;
        assert!(matches!(
            gateway.update("bad-id", &json!({})).await,
            Err(GatewayError::Validation(ValidationError::InvalidId(_)))
        ));
    }

    #[tokio::test]
    async fn test_update_never_upserts() {
        let gateway = connected().await;
        let absent = RecordId::generate();

        let err = gateway
            .update(&absent.to_hex(), &payload())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(gateway.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_fault_preserves_cause() {
        let gateway = failing().await;
        assert_refused(gateway.list().await, "find");
        assert_eq!(gateway.store().calls(), 1);
    }

    #[tokio::test]
    async fn test_each_operation_surfaces_store_fault_once() {
        let id = RecordId::generate().to_hex();

        let gateway = failing().await;
        assert_refused(gateway.get(&id).await, "find_one");
        assert_eq!(gateway.store().calls(), 1);

        let gateway = failing().await;
        assert_refused(gateway.create(&payload()).await, "insert");
        assert_eq!(gateway.store().calls(), 1);

        let gateway = failing().await;
        assert_refused(gateway.update(&id, &payload()).await, "find_one_and_update");
        assert_eq!(gateway.store().calls(), 1);

        let gateway = failing().await;
        assert_refused(gateway.delete(&id).await, "find_one_and_delete");
        assert_eq!(gateway.store().calls(), 1);
    }

    #[tokio::test]
    async fn test_rejected_input_never_reaches_store() {
        let gateway = failing().await;
        assert!(gateway.get("nope").await.unwrap_err().is_client_error());
        assert!(gateway.create(&json!({})).await.unwrap_err().is_client_error());
        assert_eq!(gateway.store().calls(), 0);
    }
}
