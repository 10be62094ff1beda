//! Plant record types
//!
//! `PlantDetails` holds the fields a client may replace on update.
//! `PlantDraft` is a validated create/update payload.
//! `PlantRecord` is what the store holds and what the API returns.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::RecordId;

/// A closed set of string values
pub trait FieldEnum: Sized + Copy + 'static {
    /// Every variant, in declaration order
    const VARIANTS: &'static [Self];

    /// Wire name of the variant
    fn as_str(&self) -> &'static str;

    /// Exact, case-sensitive match on the wire name
    fn parse(s: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == s)
    }

    fn allowed() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|v| v.as_str()).collect()
    }
}

/// Plant category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Succulent,
    Fern,
    Flowering,
}

impl FieldEnum for Category {
    const VARIANTS: &'static [Self] = &[Category::Succulent, Category::Fern, Category::Flowering];

    fn as_str(&self) -> &'static str {
        match self {
            Category::Succulent => "succulent",
            Category::Fern => "fern",
            Category::Flowering => "flowering",
        }
    }
}

/// How much attention the plant needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareLevel {
    Easy,
    Moderate,
    Difficult,
}

impl FieldEnum for CareLevel {
    const VARIANTS: &'static [Self] = &[CareLevel::Easy, CareLevel::Moderate, CareLevel::Difficult];

    fn as_str(&self) -> &'static str {
        match self {
            CareLevel::Easy => "easy",
            CareLevel::Moderate => "moderate",
            CareLevel::Difficult => "difficult",
        }
    }
}

/// Current health of the plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "average")]
    Average,
    #[serde(rename = "needs attention")]
    NeedsAttention,
    #[serde(rename = "dying")]
    Dying,
}

impl FieldEnum for HealthStatus {
    const VARIANTS: &'static [Self] = &[
        HealthStatus::Healthy,
        HealthStatus::Average,
        HealthStatus::NeedsAttention,
        HealthStatus::Dying,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Average => "average",
            HealthStatus::NeedsAttention => "needs attention",
            HealthStatus::Dying => "dying",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_via_as_str!(Category, CareLevel, HealthStatus);

/// Fields replaced wholesale on update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantDetails {
    pub image: String,
    pub plant_name: String,
    pub category: Category,
    pub description: String,
    pub care_level: CareLevel,
    pub watering_frequency: String,
    pub last_watered_date: DateTime<Utc>,
    pub next_watering_date: DateTime<Utc>,
    pub health_status: HealthStatus,
}

/// A validated payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantDraft {
    pub details: PlantDetails,
    /// Only honored at creation
    pub user_email: String,
    /// Only honored at creation
    pub user_name: String,
}

/// A stored plant record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub details: PlantDetails,
    pub user_email: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlantRecord {
    /// Build a new record from a draft; both timestamps are `now`
    pub fn create(id: RecordId, draft: PlantDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            details: draft.details,
            user_email: draft.user_email,
            user_name: draft.user_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields and refresh `updated_at`.
    ///
    /// Identifier, owner fields and `created_at` are left untouched.
    pub fn apply(&mut self, details: PlantDetails, updated_at: DateTime<Utc>) {
        self.details = details;
        self.updated_at = updated_at;
    }
}
