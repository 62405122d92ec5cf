// ABOUTME: Domain models shared by the JEFit client, exercise catalog, and MCP tools
// ABOUTME: Re-exports exercise records, workout sessions, and API envelope types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Exercise definitions mined from the web app
pub mod exercise;
/// Workout calendar and session logs from the JSON API
pub mod workout;

pub use exercise::{ExerciseCatalogStats, ExerciseRecord};
pub use workout::{
    ApiEnvelope, CalendarDay, ExerciseLog, LoginRequest, LoginResponse, SetLog, UserInfo,
    WorkoutSession,
};
