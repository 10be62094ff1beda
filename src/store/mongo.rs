//! # MongoDB Backend
//!
//! One `Client` is created at process start and shared by every request.
//! Update and delete use `find_one_and_*` so each is a single atomic
//! document operation that also yields the record to return.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::stream::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::{ClientOptions, ReturnDocument, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use crate::record::{
    CareLevel, Category, FieldEnum, HealthStatus, PlantDetails, PlantRecord, RecordId,
};

use super::backend::RecordStore;
use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};

/// Stored shape of a plant record. Dates are native BSON dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlantDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    image: String,
    plant_name: String,
    category: Category,
    description: String,
    care_level: CareLevel,
    watering_frequency: String,
    last_watered_date: bson::DateTime,
    next_watering_date: bson::DateTime,
    health_status: HealthStatus,
    user_email: String,
    user_name: String,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_bson_date(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_date(field: &str, dt: bson::DateTime) -> StoreResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()).ok_or_else(|| {
        StoreError::Corrupt(format!("field '{}' holds an out-of-range date", field))
    })
}

impl From<&PlantRecord> for PlantDocument {
    fn from(record: &PlantRecord) -> Self {
        let d = &record.details;
        Self {
            id: record.id.as_object_id(),
            image: d.image.clone(),
            plant_name: d.plant_name.clone(),
            category: d.category,
            description: d.description.clone(),
            care_level: d.care_level,
            watering_frequency: d.watering_frequency.clone(),
            last_watered_date: to_bson_date(d.last_watered_date),
            next_watering_date: to_bson_date(d.next_watering_date),
            health_status: d.health_status,
            user_email: record.user_email.clone(),
            user_name: record.user_name.clone(),
            created_at: to_bson_date(record.created_at),
            updated_at: to_bson_date(record.updated_at),
        }
    }
}

impl PlantDocument {
    fn into_record(self) -> StoreResult<PlantRecord> {
        let doc = self;
        Ok(PlantRecord {
            id: RecordId::from(doc.id),
            details: PlantDetails {
                image: doc.image,
                plant_name: doc.plant_name,
                category: doc.category,
                description: doc.description,
                care_level: doc.care_level,
                watering_frequency: doc.watering_frequency,
                last_watered_date: from_bson_date("lastWateredDate", doc.last_watered_date)?,
                next_watering_date: from_bson_date("nextWateringDate", doc.next_watering_date)?,
                health_status: doc.health_status,
            },
            user_email: doc.user_email,
            user_name: doc.user_name,
            created_at: from_bson_date("createdAt", doc.created_at)?,
            updated_at: from_bson_date("updatedAt", doc.updated_at)?,
        })
    }
}

/// `$set` document for a full replace of the mutable fields
fn mutable_fields_update(details: &PlantDetails, updated_at: DateTime<Utc>) -> Document {
    doc! {
        "$set": {
            "image": details.image.as_str(),
            "plantName": details.plant_name.as_str(),
            "category": details.category.as_str(),
            "description": details.description.as_str(),
            "careLevel": details.care_level.as_str(),
            "wateringFrequency": details.watering_frequency.as_str(),
            "lastWateredDate": to_bson_date(details.last_watered_date),
            "nextWateringDate": to_bson_date(details.next_watering_date),
            "healthStatus": details.health_status.as_str(),
            "updatedAt": to_bson_date(updated_at),
        }
    }
}

fn by_id(id: RecordId) -> Document {
    doc! { "_id": id.as_object_id() }
}

/// Map a driver error from a read. A stored document that does not decode
/// is corrupt data, not a store fault.
fn read_error(operation: &'static str, e: MongoError) -> StoreError {
    if let ErrorKind::BsonDeserialization(cause) = e.kind.as_ref() {
        return StoreError::Corrupt(format!(
            "{} returned an undecodable document: {}",
            operation, cause
        ));
    }
    StoreError::fault(operation, e)
}

/// Driver options for `config`
async fn client_options(config: &StoreConfig) -> StoreResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(|e| StoreError::fault("parse connection string", e))?;
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.app_name = Some(config.app_name.clone());

    if config.stable_api {
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
    }

    Ok(options)
}

/// MongoDB record store
#[derive(Debug, Clone)]
pub struct MongoRecordStore {
    database: Database,
    collection: Collection<PlantDocument>,
}

impl MongoRecordStore {
    /// Build the client. No network round-trip happens until the first
    /// operation (or `ping`).
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let options = client_options(config).await?;
        let client =
            Client::with_options(options).map_err(|e| StoreError::fault("create client", e))?;
        let database = client.database(&config.database);
        let collection = database.collection::<PlantDocument>(&config.collection);

        Ok(Self {
            database,
            collection,
        })
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

impl RecordStore for MongoRecordStore {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::fault("ping", e))?;
        Ok(())
    }

    async fn insert(&self, record: PlantRecord) -> StoreResult<PlantRecord> {
        let document = PlantDocument::from(&record);
        self.collection
            .insert_one(&document)
            .await
            .map_err(|e| StoreError::fault("insert", e))?;
        Ok(record)
    }

    async fn find_all(&self) -> StoreResult<Vec<PlantRecord>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| read_error("find", e))?;
        let documents: Vec<PlantDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| read_error("find", e))?;

        documents.into_iter().map(PlantDocument::into_record).collect()
    }

    async fn find_by_id(&self, id: RecordId) -> StoreResult<Option<PlantRecord>> {
        self.collection
            .find_one(by_id(id))
            .await
            .map_err(|e| read_error("find_one", e))?
            .map(PlantDocument::into_record)
            .transpose()
    }

    async fn update_mutable(
        &self,
        id: RecordId,
        details: PlantDetails,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<PlantRecord>> {
        self.collection
            .find_one_and_update(by_id(id), mutable_fields_update(&details, updated_at))
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| read_error("find_one_and_update", e))?
            .map(PlantDocument::into_record)
            .transpose()
    }

    async fn delete(&self, id: RecordId) -> StoreResult<Option<PlantRecord>> {
        self.collection
            .find_one_and_delete(by_id(id))
            .await
            .map_err(|e| read_error("find_one_and_delete", e))?
            .map(PlantDocument::into_record)
            .transpose()
    }
}
