// ABOUTME: MCP message types expressed over the shared JSON-RPC 2.0 structures
// ABOUTME: Keeps the MCP layer and the transports on one request/response shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Deserialize;
use serde_json::Value;

pub use crate::jsonrpc::{
    JsonRpcError as McpError, JsonRpcRequest as McpRequest, JsonRpcResponse as McpResponse,
};

/// Parameters of `tools/call`
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Tool to run
    pub name: String,
    /// Tool arguments; absent means no arguments
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(serde_json::Map::new())
}
