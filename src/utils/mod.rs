// ABOUTME: Utility modules shared across the server
// ABOUTME: Currently the outbound HTTP client factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Shared HTTP client construction
pub mod http_client;
