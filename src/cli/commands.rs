//! CLI command implementations
//!
//! Startup sequence for `serve`:
//! 1. Configuration (file, environment, flags)
//! 2. Store connection (single ping, fatal on failure)
//! 3. HTTP listener until Ctrl-C

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tokio::runtime::Runtime;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{Event, Logger};
use crate::store::{InMemoryRecordStore, MongoRecordStore, RecordGateway, RecordStore, StoreConfig};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run a CLI command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            in_memory,
        } => serve(config.as_deref(), port, in_memory),
        Command::Ping { config } => ping(config.as_deref()),
    }
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Ping the store once; FATAL on failure
async fn connect_gateway<S: RecordStore>(store: S) -> CliResult<RecordGateway<S>> {
    let backend = store.name();
    let mut gateway = RecordGateway::new(store);

    match gateway.connect().await {
        Ok(()) => {
            Logger::info(Event::StoreConnected, &[("backend", backend)]);
            Ok(gateway)
        }
        Err(e) => {
            let reason = e.to_string();
            Logger::fatal(
                Event::StoreConnectFailed,
                &[("backend", backend), ("error", &reason)],
            );
            Err(CliError::store_unavailable(reason))
        }
    }
}

async fn connect_mongo(config: &StoreConfig) -> CliResult<RecordGateway<MongoRecordStore>> {
    let store = MongoRecordStore::connect(config).await.map_err(|e| {
        let reason = e.to_string();
        Logger::fatal(
            Event::StoreConnectFailed,
            &[("backend", "mongodb"), ("error", &reason)],
        );
        CliError::store_unavailable(reason)
    })?;
    connect_gateway(store).await
}

async fn serve_gateway<S: RecordStore>(
    http: HttpServerConfig,
    gateway: RecordGateway<S>,
) -> CliResult<()> {
    HttpServer::new(http, Arc::new(gateway))
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

fn log_config(config: &Config, in_memory: bool) {
    let port = config.http.port.to_string();
    let backend = if in_memory { "memory" } else { "mongodb" };
    Logger::info(
        Event::ConfigLoaded,
        &[
            ("backend", backend),
            ("port", &port),
            ("resource_root", &config.http.resource_root),
            ("store_uri", &config.store.redacted_uri()),
            ("database", &config.store.database),
            ("collection", &config.store.collection),
        ],
    );
}

/// Serve the HTTP API
///
/// Exits with an error, before binding, when the store cannot be reached.
pub fn serve(config_path: Option<&Path>, port: Option<u16>, in_memory: bool) -> CliResult<()> {
    Logger::info(Event::BootStart, &[("command", "serve")]);

    let config = Config::resolve(config_path, port)?;
    log_config(&config, in_memory);

    let rt = runtime()?;
    rt.block_on(async {
        if in_memory {
            let gateway = connect_gateway(InMemoryRecordStore::new()).await?;
            serve_gateway(config.http, gateway).await
        } else {
            let gateway = connect_mongo(&config.store).await?;
            serve_gateway(config.http, gateway).await
        }
    })
}

/// Check store connectivity and print the outcome as JSON
pub fn ping(config_path: Option<&Path>) -> CliResult<()> {
    Logger::info(Event::BootStart, &[("command", "ping")]);

    let config = Config::resolve(config_path, None)?;
    log_config(&config, false);

    let rt = runtime()?;
    let gateway = rt.block_on(connect_mongo(&config.store))?;

    println!(
        "{}",
        json!({
            "store": gateway.state().as_str(),
            "backend": gateway.store().name(),
            "database": gateway.store().database_name(),
        })
    );
    Ok(())
}
