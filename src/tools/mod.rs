// ABOUTME: Pluggable MCP tools architecture with trait, registry, and execution context
// ABOUTME: Tools implement McpTool and are registered in the ToolRegistry at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Execution context handed to every tool
pub mod context;
/// Tool implementations
pub mod implementations;
/// Tool registry
pub mod registry;
/// Tool result type
pub mod result;
/// `McpTool` trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
