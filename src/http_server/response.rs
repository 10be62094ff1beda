//! # Response Envelope
//!
//! Every record endpoint answers with the same JSON shape:
//! `{status, message, data?, error?, missingFields?, invalidFields?}`.

use serde::Serialize;

use crate::record::FieldIssue;

/// Response envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_fields: Option<Vec<FieldIssue>>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
            error: None,
            missing_fields: None,
            invalid_fields: None,
        }
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
            error: None,
            missing_fields: None,
            invalid_fields: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_missing_fields(mut self, fields: Vec<&'static str>) -> Self {
        self.missing_fields = Some(fields);
        self
    }

    pub fn with_invalid_fields(mut self, issues: Vec<FieldIssue>) -> Self {
        self.invalid_fields = Some(issues);
        self
    }
}
