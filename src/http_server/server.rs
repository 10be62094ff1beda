//! # HTTP Server
//!
//! Combines the record and health routers behind CORS and request logging.

use std::io;
use std::net::SocketAddr;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{Event, Logger};
use crate::store::RecordStore;

use super::config::HttpServerConfig;
use super::middleware::log_request;
use super::observability_routes::health_routes;
use super::record_routes::{record_routes, GatewayState};

/// HTTP server for plant records
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over a gateway. The gateway should already be
    /// connected; a disconnected one answers every record request with 500.
    pub fn new<S: RecordStore>(config: HttpServerConfig, gateway: GatewayState<S>) -> Self {
        let router = Self::build_router(&config, gateway);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router<S: RecordStore>(config: &HttpServerConfig, gateway: GatewayState<S>) -> Router {
        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let root = config.resource_root.trim_end_matches('/');

        Router::new()
            .merge(health_routes(gateway.clone()))
            .nest(root, record_routes(gateway))
            .layer(middleware::from_fn(log_request))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C, then drain in-flight requests
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;

        Logger::info(
            Event::Serving,
            &[
                ("addr", &addr.to_string()),
                ("resource_root", &self.config.resource_root),
            ],
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Logger::info(Event::ShutdownComplete, &[]);
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // No signal handler: serve until the process is killed
        Logger::warn(Event::ShutdownStart, &[("error", &e.to_string())]);
        std::future::pending::<()>().await;
    }
    Logger::info(Event::ShutdownStart, &[("signal", "ctrl_c")]);
}
