// ABOUTME: Model Context Protocol server implementation
// ABOUTME: Protocol types, request processing, shared resources, and stdio/HTTP transports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Axum routes for the HTTP transport
pub mod http_setup;
/// Request validation, routing, and tool dispatch
pub mod mcp_request_processor;
/// MCP message aliases over JSON-RPC
pub mod protocol;
/// Shared server resources
pub mod resources;
/// MCP schema types
pub mod schema;
/// Transport selection and the stdio transport
pub mod transport_manager;

pub use mcp_request_processor::McpRequestProcessor;
pub use resources::ServerResources;
pub use transport_manager::{StdioTransport, TransportManager};
