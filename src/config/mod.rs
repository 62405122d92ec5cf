// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration for credentials, catalog, parser, HTTP, and transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the JEFit MCP server
//!
//! All settings come from environment variables; MCP clients pass them in
//! the server's launch configuration.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    CatalogConfig, HttpClientConfig, JefitConfig, ParserConfig, ServerConfig, TransportConfig,
    TransportKind,
};
