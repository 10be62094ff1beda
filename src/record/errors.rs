//! Record validation errors
//!
//! Every variant is a client fault and is detected before the store is
//! touched.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for record validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// One field that is present but carries an unusable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Field name as it appears in the payload
    pub field: String,
    /// Expected type or allowed values
    pub expected: String,
    /// What was found instead
    pub actual: String,
}

impl FieldIssue {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn unknown_variant(field: impl Into<String>, allowed: &[&str], actual: &str) -> Self {
        Self::new(
            field,
            format!("one of [{}]", allowed.join(", ")),
            format!("'{}'", actual),
        )
    }

    pub fn bad_date(field: impl Into<String>, actual: &str) -> Self {
        Self::new(field, "RFC 3339 timestamp or YYYY-MM-DD date", format!("'{}'", actual))
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Record validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Body is not a JSON object (or not JSON at all)
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Required fields absent, null or empty; always the complete list
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Fields present but with values of the wrong shape
    #[error("Invalid field values: {}", join_issues(.0))]
    InvalidFields(Vec<FieldIssue>),

    /// Identifier is not a well-formed ObjectId
    #[error("Invalid plant ID: '{0}'")]
    InvalidId(String),
}

impl ValidationError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidBody(_) => "PLANTCARE_INVALID_BODY",
            ValidationError::MissingFields(_) => "PLANTCARE_MISSING_FIELDS",
            ValidationError::InvalidFields(_) => "PLANTCARE_INVALID_FIELDS",
            ValidationError::InvalidId(_) => "PLANTCARE_INVALID_ID",
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
