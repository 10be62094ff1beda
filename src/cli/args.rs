//! CLI argument definitions using clap
//!
//! Commands:
//! - plantcare serve [--config <path>] [--port <port>] [--in-memory]
//! - plantcare ping [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// plantcare - plant record service
#[derive(Parser, Debug)]
#[command(name = "plantcare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to the document store and serve the HTTP API
    Serve {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding config and PORT
        #[arg(long)]
        port: Option<u16>,

        /// Keep records in process memory instead of MongoDB
        #[arg(long)]
        in_memory: bool,
    },

    /// Check that the document store is reachable and exit
    Ping {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
