// ABOUTME: MCP request processing and protocol handling
// ABOUTME: Validates, routes, and executes MCP protocol requests with proper error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use super::protocol::{McpRequest, McpResponse, ToolCallParams};
use super::resources::ServerResources;
use super::schema::{Content, InitializeResponse, ToolResponse};
use crate::constants::errors::{
    ERROR_INVALID_PARAMS, ERROR_INVALID_REQUEST, ERROR_METHOD_NOT_FOUND,
};
use crate::constants::protocol::JSONRPC_VERSION;
use crate::errors::{AppError, AppResult};
use crate::tools::{ToolExecutionContext, ToolResult};

/// Processes MCP protocol requests with validation, routing, and execution
pub struct McpRequestProcessor {
    resources: Arc<ServerResources>,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle an MCP request and return a response
    ///
    /// Notifications (`notifications/*`) produce no response.
    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        let start_time = Instant::now();
        debug!(method = %request.method, id = ?request.id, "Processing MCP request");

        if request.method.starts_with("notifications/") {
            debug!(method = %request.method, "Received notification");
            Self::log_completion("notification", start_time);
            return None;
        }

        let response = match self.process_request(&request).await {
            Ok(response) => response,
            Err(e) => Self::create_error_response(&request, &e),
        };

        Self::log_completion("request", start_time);
        Some(response)
    }

    fn create_error_response(request: &McpRequest, e: &AppError) -> McpResponse {
        error!(
            method = %request.method,
            id = ?request.id,
            "Failed to process MCP request: {e}"
        );
        McpResponse::error(request.id.clone(), e.code.jsonrpc_code(), e.to_string())
    }

    /// Process an MCP request and generate response
    async fn process_request(&self, request: &McpRequest) -> AppResult<McpResponse> {
        Self::validate_request(request)?;

        match request.method.as_str() {
            "initialize" => Ok(Self::handle_initialize(request)),
            "ping" => Ok(Self::handle_ping(request)),
            "tools/list" => Ok(self.handle_tools_list(request)),
            "tools/call" => Ok(self.handle_tools_call(request).await),
            _ => Ok(Self::handle_unknown_method(request)),
        }
    }

    /// Validate MCP request format and required fields
    fn validate_request(request: &McpRequest) -> AppResult<()> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(AppError::invalid_input(format!(
                "Invalid JSON-RPC version: got '{}', expected '{JSONRPC_VERSION}'",
                request.jsonrpc
            )));
        }

        if request.method.is_empty() {
            return Err(AppError::invalid_input("Missing method"));
        }

        Ok(())
    }

    fn handle_initialize(request: &McpRequest) -> McpResponse {
        debug!("Handling initialize request");
        match serde_json::to_value(InitializeResponse::default()) {
            Ok(result) => McpResponse::success(request.id.clone(), result),
            Err(e) => Self::create_error_response(request, &AppError::from(e)),
        }
    }

    fn handle_ping(request: &McpRequest) -> McpResponse {
        debug!("Handling ping request");
        McpResponse::success(request.id.clone(), json!({}))
    }

    fn handle_tools_list(&self, request: &McpRequest) -> McpResponse {
        debug!("Handling tools/list request");
        let tools = self.resources.tool_registry.all_schemas();
        McpResponse::success(request.id.clone(), json!({ "tools": tools }))
    }

    /// Run a tool; tool failures become results with `isError: true`
    async fn handle_tools_call(&self, request: &McpRequest) -> McpResponse {
        let params = match request
            .params
            .clone()
            .map(serde_json::from_value::<ToolCallParams>)
        {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return McpResponse::error(
                    request.id.clone(),
                    ERROR_INVALID_PARAMS,
                    format!("Invalid tools/call params: {e}"),
                )
            }
            None => {
                return McpResponse::error(
                    request.id.clone(),
                    ERROR_INVALID_PARAMS,
                    "Missing tools/call params",
                )
            }
        };

        let registry = &self.resources.tool_registry;
        if !registry.contains(&params.name) {
            warn!(tool = %params.name, "Unknown tool requested");
            return McpResponse::error(
                request.id.clone(),
                ERROR_INVALID_PARAMS,
                format!("Unknown tool: {}", params.name),
            );
        }

        let context = ToolExecutionContext::new(Arc::clone(&self.resources))
            .with_request_id(request.id.clone());
        let response = match registry
            .execute(&params.name, params.arguments, &context)
            .await
        {
            Ok(result) => Self::tool_response(&result),
            Err(e) => {
                warn!(tool = %params.name, "Tool execution failed: {e}");
                ToolResponse {
                    content: vec![Content::Text {
                        text: format!("Error: {}", e.message),
                    }],
                    is_error: true,
                    structured_content: None,
                }
            }
        };

        match serde_json::to_value(&response) {
            Ok(result) => McpResponse::success(request.id.clone(), result),
            Err(e) => Self::create_error_response(request, &AppError::from(e)),
        }
    }

    fn tool_response(result: &ToolResult) -> ToolResponse {
        ToolResponse {
            content: vec![Content::Text {
                text: result.text_content(),
            }],
            is_error: result.is_error,
            structured_content: result.structured_content(),
        }
    }

    fn handle_unknown_method(request: &McpRequest) -> McpResponse {
        warn!(method = %request.method, "Unknown MCP method");
        McpResponse::error(
            request.id.clone(),
            ERROR_METHOD_NOT_FOUND,
            format!("Unknown method: {}", request.method),
        )
    }

    fn log_completion(kind: &str, start_time: Instant) {
        let duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(kind, duration_ms, "MCP {kind} completed");
    }
}

/// Response for a message that is JSON but not a valid request
#[must_use]
pub fn invalid_request_response(message: &Value, reason: &str) -> McpResponse {
    McpResponse::error(
        message.get("id").cloned(),
        ERROR_INVALID_REQUEST,
        format!("Invalid Request: {reason}"),
    )
}
