//! Record identifiers
//!
//! Identifiers are MongoDB ObjectIds: 12 bytes, written as 24 hex digits.
//! They are generated once at creation and never change.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::{ValidationError, ValidationResult};

/// Returns true when `candidate` is a well-formed identifier.
///
/// This is a pure format check; it says nothing about whether a record with
/// that identifier exists.
pub fn is_valid_id(candidate: &str) -> bool {
    ObjectId::parse_str(candidate).is_ok()
}

/// Store-generated identifier of a plant record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(ObjectId);

impl RecordId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a client-supplied identifier
    pub fn parse(candidate: &str) -> ValidationResult<Self> {
        ObjectId::parse_str(candidate)
            .map(Self)
            .map_err(|_| ValidationError::InvalidId(candidate.to_string()))
    }

    /// Hex representation used on the wire
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for RecordId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        RecordId::parse(&hex).map_err(serde::de::Error::custom)
    }
}
