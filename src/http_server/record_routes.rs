//! Record HTTP Routes
//!
//! CRUD endpoints for plant records. Mounted under the configured resource
//! root (default `/records`).

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::record::{PlantRecord, RecordId};
use crate::store::{RecordGateway, RecordStore};

use super::errors::{ApiError, ApiResult, RecordOperation};
use super::response::Envelope;

/// Shared gateway handle
pub type GatewayState<S> = Arc<RecordGateway<S>>;

type RecordResponse = Json<Envelope<PlantRecord>>;

/// Create record routes
pub fn record_routes<S: RecordStore>(gateway: GatewayState<S>) -> Router {
    Router::new()
        .route("/", get(list_records::<S>).post(create_record::<S>))
        .route(
            "/:id",
            get(get_record::<S>)
                .put(update_record::<S>)
                .delete(delete_record::<S>),
        )
        .with_state(gateway)
}

/// Refused bodies are reported through the envelope, not as plain text.
/// The rejection's status is kept.
fn json_body(
    operation: RecordOperation,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        ApiError::rejected_body(operation, rejection.status(), rejection.body_text())
    })
}

fn ok(operation: RecordOperation, record: PlantRecord) -> RecordResponse {
    Json(Envelope::success(operation.success_message(), record))
}

async fn list_records<S: RecordStore>(
    State(gateway): State<GatewayState<S>>,
) -> ApiResult<Json<Envelope<Vec<PlantRecord>>>> {
    let op = RecordOperation::List;
    let records = gateway.list().await.map_err(|e| ApiError::new(op, e))?;
    Ok(Json(Envelope::success(op.success_message(), records)))
}

async fn get_record<S: RecordStore>(
    State(gateway): State<GatewayState<S>>,
    Path(id): Path<String>,
) -> ApiResult<RecordResponse> {
    let op = RecordOperation::Get;
    let record = gateway.get(&id).await.map_err(|e| ApiError::new(op, e))?;
    Ok(ok(op, record))
}

async fn create_record<S: RecordStore>(
    State(gateway): State<GatewayState<S>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, RecordResponse)> {
    let op = RecordOperation::Create;
    let payload = json_body(op, payload)?;
    let record = gateway
        .create(&payload)
        .await
        .map_err(|e| ApiError::new(op, e))?;
    Ok((StatusCode::CREATED, ok(op, record)))
}

async fn update_record<S: RecordStore>(
    State(gateway): State<GatewayState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<RecordResponse> {
    let op = RecordOperation::Update;
    // Identifier is judged before the body
    RecordId::parse(&id).map_err(|e| ApiError::new(op, e))?;
    let payload = json_body(op, payload)?;
    let record = gateway
        .update(&id, &payload)
        .await
        .map_err(|e| ApiError::new(op, e))?;
    Ok(ok(op, record))
}

async fn delete_record<S: RecordStore>(
    State(gateway): State<GatewayState<S>>,
    Path(id): Path<String>,
) -> ApiResult<RecordResponse> {
    let op = RecordOperation::Delete;
    let record = gateway.delete(&id).await.map_err(|e| ApiError::new(op, e))?;
    Ok(ok(op, record))
}
