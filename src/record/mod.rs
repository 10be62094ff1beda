//! Plant records and their validation
//!
//! A payload is checked here before anything reaches the store:
//!
//! - every required field present and non-empty
//! - enum fields restricted to their closed sets
//! - dates parseable
//! - identifiers well-formed

mod errors;
mod id;
mod types;
mod validator;

pub use errors::{FieldIssue, ValidationError, ValidationResult};
pub use id::{is_valid_id, RecordId};
pub use types::{
    CareLevel, Category, FieldEnum, HealthStatus, PlantDetails, PlantDraft, PlantRecord,
};
pub use validator::{missing_fields, parse_date, validate, REQUIRED_FIELDS};
