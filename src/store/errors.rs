//! # Store Errors

use thiserror::Error;

/// Boxed underlying cause, kept intact for diagnostics
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Gateway has not established its connection
    #[error("Document store is not connected")]
    Disconnected,

    /// Connectivity, constraint or driver failure
    #[error("Store {operation} failed: {source}")]
    Fault {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// A stored document could not be read back as a plant record
    #[error("Stored document is malformed: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn fault(operation: &'static str, source: impl Into<BoxError>) -> Self {
        StoreError::Fault {
            operation,
            source: source.into(),
        }
    }

    /// The operation that failed, when known
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            StoreError::Fault { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
