//! # Record Store
//!
//! The Record Store Gateway and the backends it can sit on.
//!
//! - `RecordGateway`: validation, connection state, result mapping
//! - `RecordStore`: backend trait
//! - `MongoRecordStore`: MongoDB via the official driver
//! - `InMemoryRecordStore`: process-local, for tests and development

mod backend;
mod config;
mod errors;
mod gateway;
mod memory;
mod mongo;

pub use backend::RecordStore;
pub use config::StoreConfig;
pub use errors::{BoxError, StoreError, StoreResult};
pub use gateway::{ConnectionState, GatewayError, GatewayResult, RecordGateway};
pub use memory::InMemoryRecordStore;
pub use mongo::MongoRecordStore;
