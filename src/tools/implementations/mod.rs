// ABOUTME: Module containing the MCP tool implementations.
// ABOUTME: Workout history tools backed by the JEFit client and exercise catalog.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Workout tools: `list_workout_dates`, `get_workout_info`, `get_batch_workouts`
pub mod workouts;
