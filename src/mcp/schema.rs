// ABOUTME: MCP protocol schema definitions and message structures
// ABOUTME: Defines the handshake, tool schema, and tool response types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MCP Protocol Schema Definitions
//!
//! Type-safe definitions for the MCP messages this server sends, so that
//! tool schemas and handshake payloads are never hand-written JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::protocol::MCP_PROTOCOL_VERSION;
use crate::constants::service_names::JEFIT_MCP_SERVER;

/// Usage hint returned from `initialize`
pub const SERVER_INSTRUCTIONS: &str = "Analyzes JEFit workout data and provides workout history. \
Use for tracking workout dates, analyzing exercise routines, \
and viewing detailed session information. All dates use YYYY-MM-DD format (ISO 8601).";

/// Server Information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// MCP Tool Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// What the tool does
    pub description: String,
    /// Argument schema
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `object` for tool arguments
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Argument properties by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Required argument names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// Object schema with the given properties and required names
    #[must_use]
    pub fn object(properties: HashMap<String, PropertySchema>, required: &[&str]) -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: Some(required.iter().map(|&name| name.to_owned()).collect()),
        }
    }
}

/// JSON Schema Property Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type name
    #[serde(rename = "type")]
    pub property_type: String,
    /// Shown to the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Element schema of an array property
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
}

impl PropertySchema {
    /// String property
    #[must_use]
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            property_type: "string".to_owned(),
            description: Some(description.into()),
            items: None,
        }
    }

    /// Array-of-strings property
    #[must_use]
    pub fn string_array(description: impl Into<String>) -> Self {
        Self {
            property_type: "array".to_owned(),
            description: Some(description.into()),
            items: Some(Box::new(Self {
                property_type: "string".to_owned(),
                description: None,
                items: None,
            })),
        }
    }
}

/// Tool Response after execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Result content blocks
    pub content: Vec<Content>,
    /// Whether the tool failed
    #[serde(rename = "isError")]
    pub is_error: bool,
    /// Machine-readable result
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

/// Content types for MCP messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain or markdown text
    #[serde(rename = "text")]
    Text {
        /// The text
        text: String,
    },
}

/// MCP Server Capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Tool support
    pub tools: Option<ToolsCapability>,
}

/// Tools capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether the server announces tool list changes
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Result of `initialize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// Negotiated MCP version
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Name and version
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Supported features
    pub capabilities: ServerCapabilities,
    /// Usage hint for the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResponse {
    /// Handshake result for this server; the tool list is fixed at startup
    #[must_use]
    pub fn new(protocol_version: String, server_name: String, server_version: String) -> Self {
        Self {
            protocol_version,
            server_info: ServerInfo {
                name: server_name,
                version: server_version,
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_owned()),
        }
    }
}

impl Default for InitializeResponse {
    fn default() -> Self {
        Self::new(
            MCP_PROTOCOL_VERSION.to_owned(),
            JEFIT_MCP_SERVER.to_owned(),
            env!("CARGO_PKG_VERSION").to_owned(),
        )
    }
}
