// ABOUTME: Output formatting for tool results
// ABOUTME: Renders workout sessions as markdown reports for LLM consumption
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Output formatting
//!
//! Tool results are markdown text; assistants read it directly and can
//! quote it back to the user without further conversion.

/// Markdown workout reports
pub mod markdown;

pub use markdown::{join_reports, render_workout_report};
