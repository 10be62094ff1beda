//! Record validator
//!
//! Validation runs in two passes over an untyped JSON payload:
//!
//! 1. Presence: every required field must be present, non-null and not the
//!    empty string. All missing fields are reported together.
//! 2. Shape: strings must be strings, enum fields must name a known variant,
//!    dates must parse. All problems are reported together.
//!
//! Unknown fields, `_id`, `createdAt` and `updatedAt` are ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde_json::{Map, Value};

use super::errors::{FieldIssue, ValidationError, ValidationResult};
use super::types::{CareLevel, Category, FieldEnum, HealthStatus, PlantDetails, PlantDraft};

/// Required fields, in the order they are reported
pub const REQUIRED_FIELDS: [&str; 11] = [
    "image",
    "plantName",
    "category",
    "description",
    "careLevel",
    "wateringFrequency",
    "lastWateredDate",
    "nextWateringDate",
    "healthStatus",
    "userEmail",
    "userName",
];

/// Validate a create or update payload.
///
/// # Errors
///
/// - `InvalidBody` if the payload is not a JSON object
/// - `MissingFields` with every absent, null or empty required field
/// - `InvalidFields` with every present field whose value is unusable
pub fn validate(payload: &Value) -> ValidationResult<PlantDraft> {
    let obj = payload.as_object().ok_or_else(|| {
        ValidationError::InvalidBody(format!(
            "expected a JSON object, got {}",
            json_type_name(payload)
        ))
    })?;

    let missing = missing_fields(obj);
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let mut reader = FieldReader::new(obj);

    let image = reader.string("image");
    let plant_name = reader.string("plantName");
    let category = reader.choice::<Category>("category");
    let description = reader.string("description");
    let care_level = reader.choice::<CareLevel>("careLevel");
    let watering_frequency = reader.string("wateringFrequency");
    let last_watered_date = reader.date("lastWateredDate");
    let next_watering_date = reader.date("nextWateringDate");
    let health_status = reader.choice::<HealthStatus>("healthStatus");
    let user_email = reader.string("userEmail");
    let user_name = reader.string("userName");

    let (
        Some(image),
        Some(plant_name),
        Some(category),
        Some(description),
        Some(care_level),
        Some(watering_frequency),
        Some(last_watered_date),
        Some(next_watering_date),
        Some(health_status),
        Some(user_email),
        Some(user_name),
    ) = (
        image,
        plant_name,
        category,
        description,
        care_level,
        watering_frequency,
        last_watered_date,
        next_watering_date,
        health_status,
        user_email,
        user_name,
    )
    else {
        return Err(ValidationError::InvalidFields(reader.into_issues()));
    };

    Ok(PlantDraft {
        details: PlantDetails {
            image,
            plant_name,
            category,
            description,
            care_level,
            watering_frequency,
            last_watered_date,
            next_watering_date,
            health_status,
        },
        user_email,
        user_name,
    })
}

/// Names of required fields that are absent, null or empty, in
/// [`REQUIRED_FIELDS`] order.
pub fn missing_fields(obj: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| is_blank(obj.get(*field)))
        .collect()
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Typed reads that record an issue instead of failing fast
struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        Self {
            obj,
            issues: Vec::new(),
        }
    }

    fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }

    fn str_value(&mut self, field: &str) -> Option<&'a str> {
        let obj = self.obj;
        let value = obj.get(field)?;
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.issues
                    .push(FieldIssue::type_mismatch(field, "string", json_type_name(value)));
                None
            }
        }
    }

    fn string(&mut self, field: &str) -> Option<String> {
        self.str_value(field).map(str::to_owned)
    }

    fn choice<T: FieldEnum>(&mut self, field: &str) -> Option<T> {
        let raw = self.str_value(field)?;
        let parsed = T::parse(raw);
        if parsed.is_none() {
            self.issues
                .push(FieldIssue::unknown_variant(field, &T::allowed(), raw));
        }
        parsed
    }

    fn date(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let obj = self.obj;
        let value = obj.get(field)?;
        let parsed = match value {
            Value::String(s) => parse_date(s),
            // Milliseconds since the Unix epoch
            Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
            _ => {
                self.issues.push(FieldIssue::type_mismatch(
                    field,
                    "date string",
                    json_type_name(value),
                ));
                return None;
            }
        };

        if parsed.is_none() {
            let raw = value
                .as_str()
                .map(str::to_owned)
                .unwrap_or_else(|| value.to_string());
            self.issues.push(FieldIssue::bad_date(field, &raw));
        }
        parsed.map(|d| d.trunc_subsecs(3))
    }
}

/// Accepts RFC 3339 timestamps, naive timestamps (read as UTC) and plain
/// calendar dates (midnight UTC).
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
