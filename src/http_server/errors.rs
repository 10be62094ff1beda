//! # HTTP Errors
//!
//! Maps gateway outcomes onto status codes and failure envelopes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::observability::{Event, Logger};
use crate::record::ValidationError;
use crate::store::GatewayError;

use super::response::Envelope;

/// Result type for record handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// The record operation a request performs; selects the envelope messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl RecordOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOperation::List => "list",
            RecordOperation::Get => "get",
            RecordOperation::Create => "create",
            RecordOperation::Update => "update",
            RecordOperation::Delete => "delete",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            RecordOperation::List => "Plants retrieved successfully",
            RecordOperation::Get => "Plant retrieved successfully",
            RecordOperation::Create => "Plant added successfully",
            RecordOperation::Update => "Plant updated successfully",
            RecordOperation::Delete => "Plant deleted successfully",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            RecordOperation::List => "Failed to retrieve plants",
            RecordOperation::Get => "Failed to retrieve plant",
            RecordOperation::Create => "Failed to add plant",
            RecordOperation::Update => "Failed to update plant",
            RecordOperation::Delete => "Failed to delete plant",
        }
    }
}

/// A failed record request
#[derive(Debug, Error)]
#[error("{} failed: {error}", .operation.as_str())]
pub struct ApiError {
    pub operation: RecordOperation,
    #[source]
    pub error: GatewayError,
    status: Option<StatusCode>,
}

impl ApiError {
    pub fn new(operation: RecordOperation, error: impl Into<GatewayError>) -> Self {
        Self {
            operation,
            error: error.into(),
            status: None,
        }
    }

    /// A request body the extractor refused, answered with the extractor's
    /// own status (413 for an oversized body, 415 for a wrong content type)
    pub fn rejected_body(
        operation: RecordOperation,
        status: StatusCode,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status: Some(status),
            ..Self::new(operation, ValidationError::InvalidBody(reason.into()))
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        if let Some(status) = self.status {
            return status;
        }

        match &self.error {
            // 400 Bad Request
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            GatewayError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn envelope(&self) -> Envelope<()> {
        match &self.error {
            GatewayError::Validation(ValidationError::InvalidBody(reason)) => {
                Envelope::failure("Invalid request body").with_error(reason.clone())
            }
            GatewayError::Validation(ValidationError::MissingFields(fields)) => {
                Envelope::failure("All fields are required").with_missing_fields(fields.clone())
            }
            GatewayError::Validation(ValidationError::InvalidFields(issues)) => {
                Envelope::failure("Invalid field values").with_invalid_fields(issues.clone())
            }
            GatewayError::Validation(ValidationError::InvalidId(_)) => {
                Envelope::failure("Invalid plant ID")
            }
            GatewayError::NotFound(_) => Envelope::failure("Plant not found"),
            GatewayError::Store(cause) => {
                Envelope::failure(self.operation.failure_message()).with_error(cause.to_string())
            }
        }
    }
}

impl From<ApiError> for Envelope<()> {
    fn from(err: ApiError) -> Self {
        err.envelope()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self.error {
            GatewayError::Store(cause) => Logger::error(
                Event::StoreFault,
                &[
                    ("operation", self.operation.as_str()),
                    ("error", &cause.to_string()),
                ],
            ),
            GatewayError::Validation(rejection) => Logger::warn(
                Event::RecordRejected,
                &[
                    ("operation", self.operation.as_str()),
                    ("code", rejection.code()),
                ],
            ),
            GatewayError::NotFound(_) => {}
        }

        (status, Json(self.envelope())).into_response()
    }
}
