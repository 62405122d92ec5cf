// ABOUTME: JEFit upstream access module
// ABOUTME: Authenticated client for the JEFit v2 API and the web app flight stream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client with login and session caching
pub mod client;

pub use client::{hash_password, local_midnight_timestamp, JefitClient, JefitSession};
