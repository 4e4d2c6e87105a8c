//! Main entry point for the user registry server.
//!
//! Loads `.env`, parses the command line, initializes logging, then serves
//! the user CRUD API on the configured store backend until Ctrl-C.

mod api;
mod cli;
mod config;
mod db;
mod errors;
mod schema;
mod store;
mod utils;

use clap::Parser;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    let cli = cli::Cli::parse();
    utils::init_logging(&cli.logging_level, cli.log_file);

    if let Err(e) = dotenv {
        warn!("Failed to load .env file: {}", e);
    }

    let config = match cli.server_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    info!(
        "Starting server on {}:{} with {} store",
        config.host, config.port, config.store.backend
    );

    if let Err(e) = api::server::launch_server(&config).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
