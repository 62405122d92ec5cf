// ABOUTME: Core types and parsing primitives for the JEFit MCP server
// ABOUTME: Foundation crate with error handling, flight-stream parsing, models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # JEFit Core
//!
//! Foundation crate for the JEFit MCP server. Everything here is synchronous
//! and free of I/O so it can be unit tested in isolation and shared between
//! the server binary and the catalog maintenance tool.
//!
//! ## Modules
//!
//! - **errors**: `AppError`/`ErrorCode` plus the parser's `RscError`
//! - **rsc**: React Server Components stream decoding, reference resolution
//!   and structural mining
//! - **models**: exercise records and workout session shapes returned by JEFit
//! - **constants**: wire-level and domain constants

/// Unified error handling with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Domain models (exercises, workout calendar, sessions)
pub mod models;

/// React Server Components stream parser
pub mod rsc;
