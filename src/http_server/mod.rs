//! # HTTP Server Module
//!
//! Axum server exposing the plant record endpoints.
//!
//! # Endpoints
//!
//! - `/` - Liveness banner
//! - `/health` - Health check with store state
//! - `<resource_root>` and `<resource_root>/:id` - Record CRUD (default `/records`)

pub mod config;
pub mod errors;
pub mod middleware;
pub mod observability_routes;
pub mod record_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, RecordOperation};
pub use record_routes::GatewayState;
pub use response::Envelope;
pub use server::HttpServer;
