// ABOUTME: HTTP route configuration for the MCP server
// ABOUTME: Serves JSON-RPC on POST /mcp plus health and readiness probes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Route Setup Module
//!
//! The HTTP transport accepts one JSON-RPC message per `POST /mcp` request.
//! A request answers with the JSON-RPC response; a notification answers
//! `202 Accepted` with an empty body.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::mcp_request_processor::{invalid_request_response, McpRequestProcessor};
use super::protocol::{McpRequest, McpResponse};
use super::resources::ServerResources;
use crate::constants::errors::ERROR_PARSE;

/// HTTP route configuration utilities
pub struct HttpSetup;

impl HttpSetup {
    /// Router with the MCP endpoint and health probes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/mcp", post(handle_mcp))
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(resources)
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn ready_handler(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
    Json(json!({
        "status": "ready",
        "catalog_loaded": resources.catalog.is_loaded(),
        "tools": resources.tool_registry.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn handle_mcp(State(resources): State<Arc<ServerResources>>, body: String) -> Response {
    let message: Value = match serde_json::from_str(&body) {
        Ok(message) => message,
        Err(e) => {
            warn!("Invalid JSON-RPC message: {e}");
            let response = McpResponse::error(None, ERROR_PARSE, "Parse error");
            return (StatusCode::OK, Json(response)).into_response();
        }
    };

    let request: McpRequest = match serde_json::from_value(message.clone()) {
        Ok(request) => request,
        Err(e) => {
            warn!("Failed to parse MCP request: {e}");
            let response = invalid_request_response(&message, &e.to_string());
            return (StatusCode::OK, Json(response)).into_response();
        }
    };

    let processor = McpRequestProcessor::new(resources);
    match processor.handle_request(request).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
