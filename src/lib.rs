//! plantcare - plant record service
//!
//! HTTP CRUD over plant records kept in a document store.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod record;
pub mod store;
