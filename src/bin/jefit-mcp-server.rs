// ABOUTME: MCP server binary exposing JEFit workout history as tools
// ABOUTME: Serves JSON-RPC over stdio by default, or over HTTP when a port is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # JEFit MCP Server Binary
//!
//! Reads credentials and settings from the environment, warms the exercise
//! catalog in the background, and serves MCP requests until stdin closes or
//! the HTTP listener stops.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use jefit_mcp_server::{
    config::{ServerConfig, TransportKind},
    logging,
    mcp::{ServerResources, TransportManager},
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "jefit-mcp-server")]
#[command(about = "JEFit MCP Server - workout history tools for AI assistants")]
pub struct Args {
    /// Serve over HTTP on this port (overrides PORT)
    #[arg(long, conflicts_with = "stdio")]
    http_port: Option<u16>,

    /// Serve over stdin/stdout even if PORT is set
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.transport.port = Some(http_port);
    }
    if args.stdio {
        config.transport.port = None;
    }

    info!("Starting JEFit MCP Server");
    info!("{}", config.summary());

    let kind = config.transport.kind();
    let resources = Arc::new(ServerResources::new(config));

    let warm = Arc::clone(&resources);
    tokio::spawn(async move {
        warm.catalog.ensure_loaded(&warm.client).await;
        let exercises = warm.catalog.len().await;
        info!(exercises, "Exercise catalog ready");
    });

    if let TransportKind::Http { port } = kind {
        info!("MCP endpoint: http://{}:{port}/mcp", resources.config.transport.host);
    }

    if let Err(e) = TransportManager::new(resources).run(kind).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
