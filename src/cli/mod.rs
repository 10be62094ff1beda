//! CLI module for plantcare
//!
//! Provides command-line interface for:
//! - serve: Connect to the store and serve the HTTP API
//! - ping: Check store connectivity and exit

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{ping, run, run_command, serve};
pub use config::{Config, ENV_MONGODB_URI, ENV_PORT};
pub use errors::{CliError, CliErrorCode, CliResult};
