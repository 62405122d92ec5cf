// ABOUTME: Application error types re-exported from the core crate
// ABOUTME: Single import point for AppError, ErrorCode, AppResult, and domain errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Error types live in `jefit-core` so the parser and models can return them
//! without depending on the server. This module re-exports them for the rest
//! of the application.

pub use jefit_core::errors::{AppError, AppResult, ErrorCode, RscError, ToolError};
