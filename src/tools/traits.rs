// ABOUTME: Defines the McpTool trait and ToolCapabilities for the pluggable tools architecture.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Tool Trait and Capabilities
//!
//! All tools implement `McpTool`, which provides:
//! - Tool metadata (name, description, input schema)
//! - Capability flags for discovery and logging
//! - Async execution with context

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for discovery and logging.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool reads workout data
        const READS_DATA = 0b0000_0001;
        /// Tool needs a logged-in JEFit session
        const REQUIRES_SESSION = 0b0000_0010;
        /// Tool resolves exercise ids through the catalog
        const USES_CATALOG = 0b0000_0100;
    }
}

impl ToolCapabilities {
    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ").to_lowercase()
        }
    }
}

/// The main trait that all MCP tools must implement.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use jefit_mcp_server::tools::{McpTool, ToolCapabilities, ToolResult, ToolExecutionContext};
/// use jefit_mcp_server::mcp::schema::JsonSchema;
/// use jefit_mcp_server::errors::AppResult;
/// use serde_json::Value;
///
/// struct PingTool;
///
/// #[async_trait]
/// impl McpTool for PingTool {
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     fn description(&self) -> &'static str {
///         "Answer pong"
///     }
///
///     fn input_schema(&self) -> JsonSchema {
///         JsonSchema {
///             schema_type: "object".to_owned(),
///             properties: None,
///             required: None,
///         }
///     }
///
///     fn capabilities(&self) -> ToolCapabilities {
///         ToolCapabilities::empty()
///     }
///
///     async fn execute(
///         &self,
///         _args: Value,
///         _context: &ToolExecutionContext,
///     ) -> AppResult<ToolResult> {
///         Ok(ToolResult::text("pong"))
///     }
/// }
/// ```
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier used for lookup and in `tools/call`
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned from `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for argument validation failures and upstream errors
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
