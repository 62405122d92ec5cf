// ABOUTME: Main library entry point for the JEFit MCP server
// ABOUTME: Exposes JEFit workout history to AI assistants as MCP tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # JEFit MCP Server
//!
//! A Model Context Protocol (MCP) server that logs into a JEFit account and
//! answers questions about its workout history.
//!
//! ## Features
//!
//! - **Workout tools**: list workout dates, render a day as markdown, or batch several days
//! - **Exercise catalog**: exercise names, muscle groups, and equipment mined from the
//!   JEFit web app's React Server Components flight stream and cached on disk
//! - **Two transports**: JSON-RPC over stdio, or over HTTP when `PORT` is set
//!
//! ## Architecture
//!
//! - **`jefit`**: authenticated HTTP client for the JEFit API and web app
//! - **`catalog`**: exercise catalog persistence and extraction
//! - **`formatters`**: markdown workout reports
//! - **`tools`**: MCP tool trait, registry, and the workout tools
//! - **`mcp`**: protocol types, request processing, and transports
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use jefit_mcp_server::config::ServerConfig;
//! use jefit_mcp_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Exercise catalog persistence and extraction from the flight stream
pub mod catalog;

/// Environment-based configuration
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// Markdown rendering of workout sessions
pub mod formatters;

/// JEFit HTTP client
pub mod jefit;

/// JSON-RPC 2.0 message types
pub mod jsonrpc;

/// Structured logging
pub mod logging;

/// MCP protocol handling and transports
pub mod mcp;

/// MCP tools
pub mod tools;

/// Shared utilities
pub mod utils;
