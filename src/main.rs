//! Aikido MCP - Aikido Security findings as Model Context Protocol tools

use std::sync::Arc;

use clap::Parser;
use log::{LevelFilter, info, warn};

mod cli;
mod client;
mod config;
mod error;
mod models;
mod server;
mod tools;

use cli::Cli;
use client::AikidoClient;
use config::{Config, load_env_file};
use error::Result;
use server::AikidoMcpServer;
use tools::{ToolHandlers, ToolRegistry};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol; logs go to stderr
    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.target(env_logger::Target::Stderr).init();

    if let Some(path) = load_env_file(cli.env_file.as_deref())? {
        info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env(cli.region, cli.base_url)?;
    if let Err(err) = config.require_credentials() {
        warn!("{}", err);
    }

    let api = AikidoClient::new(&config)?;
    let handlers = ToolHandlers::new(Arc::new(api));
    let server = AikidoMcpServer::new(ToolRegistry::new(handlers));

    server::serve_stdio(server).await
}
