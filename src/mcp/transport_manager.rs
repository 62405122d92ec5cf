// ABOUTME: Transport selection for the MCP server and the stdio transport
// ABOUTME: Runs JSON-RPC over stdin/stdout, or over HTTP when a port is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::http_setup::HttpSetup;
use super::mcp_request_processor::{invalid_request_response, McpRequestProcessor};
use super::protocol::{McpRequest, McpResponse};
use super::resources::ServerResources;
use crate::config::TransportKind;
use crate::constants::errors::ERROR_PARSE;
use crate::errors::{AppError, AppResult};

/// Runs the transport selected by configuration
pub struct TransportManager {
    resources: Arc<ServerResources>,
}

impl TransportManager {
    /// Create a new transport manager with shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Serve until stdin closes (stdio) or the listener fails (HTTP)
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot start or fails while serving
    pub async fn run(&self, kind: TransportKind) -> AppResult<()> {
        match kind {
            TransportKind::Stdio => StdioTransport::new(Arc::clone(&self.resources)).run().await,
            TransportKind::Http { port } => self.run_http(port).await,
        }
    }

    async fn run_http(&self, port: u16) -> AppResult<()> {
        let address = format!("{}:{port}", self.resources.config.transport.host);
        let listener = TcpListener::bind(&address).await?;
        info!("MCP HTTP transport listening on http://{address}/mcp");

        let app = HttpSetup::routes(Arc::clone(&self.resources));
        axum::serve(listener, app)
            .await
            .map_err(|e| AppError::internal(format!("HTTP transport failed: {e}")))
    }
}

/// JSON-RPC over stdin/stdout, one message per line
pub struct StdioTransport {
    resources: Arc<ServerResources>,
}

impl StdioTransport {
    /// Creates a new stdio transport instance
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Create a JSON-RPC parse error response
    fn parse_error_response() -> McpResponse {
        McpResponse::error(None, ERROR_PARSE, "Parse error")
    }

    /// Response to one input line, if any
    pub async fn process_line(&self, line: &str) -> Option<McpResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Invalid JSON-RPC message: {e}");
                return Some(Self::parse_error_response());
            }
        };

        match serde_json::from_value::<McpRequest>(message.clone()) {
            Ok(request) => {
                let processor = McpRequestProcessor::new(Arc::clone(&self.resources));
                processor.handle_request(request).await
            }
            Err(e) => {
                warn!("Failed to parse MCP request: {e}");
                Some(invalid_request_response(&message, &e.to_string()))
            }
        }
    }

    /// Run stdio transport for MCP communication
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin or writing stdout fails
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready - listening on stdin/stdout");

        let mut lines = BufReader::new(io::stdin()).lines();
        let mut stdout = io::stdout();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.process_line(&line).await {
                let mut json = serde_json::to_string(&response)?;
                json.push('\n');
                stdout.write_all(json.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, stopping stdio transport");
        Ok(())
    }
}
